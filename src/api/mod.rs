// API module entry
// Route parsing and method dispatch for the todo CRUD surface

mod handlers;
mod response;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::logger;

/// A parsed API path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRoute {
    /// `/`
    Root,
    /// `/lists`
    Lists,
    /// `/lists/{listId}`
    List(String),
    /// `/lists/{listId}/items`
    Items(String),
    /// `/lists/{listId}/items/{itemId}`
    Item(String, String),
}

/// Parse a request path into an `ApiRoute`. Trailing slashes are
/// tolerated; anything outside the surface is `None`.
pub fn parse_route(path: &str) -> Option<ApiRoute> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
        [] => Some(ApiRoute::Root),
        ["lists"] => Some(ApiRoute::Lists),
        ["lists", list_id] => Some(ApiRoute::List((*list_id).to_string())),
        ["lists", list_id, "items"] => Some(ApiRoute::Items((*list_id).to_string())),
        ["lists", list_id, "items", item_id] => Some(ApiRoute::Item(
            (*list_id).to_string(),
            (*item_id).to_string(),
        )),
        _ => None,
    }
}

/// Top-level request handler.
///
/// Short-circuits preflight, oversized bodies, and unknown routes, then
/// dispatches on `(method, route)`. Every response passes through the
/// CORS step when enabled, so error payloads carry the headers too.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let request_headers = req.headers().clone();

    let mut response = if method == Method::OPTIONS {
        response::build_preflight_response(&request_headers)
    } else if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        resp
    } else {
        dispatch(req, &state).await
    };

    if state.config.http.enable_cors {
        response::apply_cors(&mut response, &request_headers);
    }

    if state.config.logging.access_log {
        use hyper::body::Body;
        let body_bytes = response.body().size_hint().exact().unwrap_or(0);
        logger::log_request(&method, &uri, response.status().as_u16(), body_bytes);
    }

    Ok(response)
}

async fn dispatch(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let Some(route) = parse_route(req.uri().path()) else {
        return response::route_not_found();
    };
    let method = req.method().clone();

    match (method, route) {
        (Method::GET, ApiRoute::Root) => handlers::handle_root(),
        (Method::GET, ApiRoute::Lists) => handlers::handle_get_lists(state).await,
        (Method::POST, ApiRoute::Lists) => handlers::handle_create_list(req, state).await,
        (Method::GET, ApiRoute::List(list_id)) => {
            handlers::handle_get_list(state, &list_id).await
        }
        (Method::PUT, ApiRoute::List(list_id)) => {
            handlers::handle_update_list(req, state, &list_id).await
        }
        (Method::DELETE, ApiRoute::List(list_id)) => {
            handlers::handle_delete_list(state, &list_id).await
        }
        (Method::GET, ApiRoute::Items(list_id)) => {
            handlers::handle_get_items(state, &list_id).await
        }
        (Method::POST, ApiRoute::Items(list_id)) => {
            handlers::handle_create_item(req, state, &list_id).await
        }
        (Method::PUT, ApiRoute::Item(list_id, item_id)) => {
            handlers::handle_update_item(req, state, &list_id, &item_id).await
        }
        (Method::DELETE, ApiRoute::Item(list_id, item_id)) => {
            handlers::handle_delete_item(state, &list_id, &item_id).await
        }
        (method, route) => {
            logger::log_warning(&format!("Method not allowed: {method} on {route:?}"));
            response::method_not_allowed(allowed_methods(&route))
        }
    }
}

/// `Allow` header value for each route.
const fn allowed_methods(route: &ApiRoute) -> &'static str {
    match route {
        ApiRoute::Root => "GET, OPTIONS",
        ApiRoute::Lists | ApiRoute::Items(_) => "GET, POST, OPTIONS",
        ApiRoute::List(_) => "GET, PUT, DELETE, OPTIONS",
        ApiRoute::Item(_, _) => "PUT, DELETE, OPTIONS",
    }
}

/// Validate Content-Length against the configured maximum.
/// Returns `Some(413 response)` if too large, `None` otherwise.
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let size_str = content_length.to_str().ok()?;
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(response::payload_too_large())
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}
