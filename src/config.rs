use serde::Deserialize;
use std::net::SocketAddr;
use tokio::sync::RwLock;

use crate::store::TodoStore;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

impl Config {
    /// Load configuration from an optional `config.toml` plus `TODO_API_*`
    /// environment overrides. Defaults reproduce the stock demo setup:
    /// bind all interfaces on port 8001, CORS on.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("TODO_API"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8001)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "todo-api")?
            .set_default("http.enable_cors", true)?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Shared application state: the configuration plus the todo store.
///
/// The store sits behind a single `RwLock`; mutating handlers hold the
/// write lock across their whole scan-and-mutate so id assignment stays
/// consistent under concurrent requests.
pub struct AppState {
    pub config: Config,
    pub store: RwLock<TodoStore>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            store: RwLock::new(TodoStore::seeded()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_setup() {
        let cfg = Config::load().expect("defaults always deserialize");
        assert_eq!(cfg.server.port, 8001);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert!(cfg.http.enable_cors);
        assert!(cfg.logging.access_log);
        assert!(cfg.server.workers.is_none());
    }

    #[test]
    fn test_socket_addr_parses() {
        let cfg = Config::load().unwrap();
        let addr = cfg.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8001);
    }
}
