//! JSON response building
//!
//! All endpoint responses go through `json_response`, which serializes the
//! body and falls back to a plain 500 if serialization or response
//! construction fails. CORS headers are applied afterwards by the router
//! so every response (including errors) carries them.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{HeaderMap, Response, StatusCode};
use serde::Serialize;

use crate::logger;

/// Build a JSON response with the given status.
pub fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response<Full<Bytes>> {
    let json = match serde_json::to_string(body) {
        Ok(j) => j,
        Err(e) => {
            logger::log_error(&format!("Failed to serialize response: {e}"));
            return Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .header("Content-Type", "application/json")
                .body(Full::new(Bytes::from(
                    r#"{"error":"Internal server error"}"#,
                )))
                .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Error"))));
        }
    };

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            logger::log_error(&format!("Failed to build response: {e}"));
            Response::new(Full::new(Bytes::from("Error")))
        })
}

/// Not-found payload for a missing list.
///
/// Returned with status 200; existing clients detect lookup misses
/// through the body alone.
pub fn list_not_found() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &serde_json::json!({"error": "List not found"}))
}

/// Not-found payload for a missing item (or an item under the wrong list).
pub fn item_not_found() -> Response<Full<Bytes>> {
    json_response(StatusCode::OK, &serde_json::json!({"error": "Item not found"}))
}

/// 400 Bad Request with an error message, used for unreadable or
/// shape-invalid request bodies.
pub fn bad_request(message: &str) -> Response<Full<Bytes>> {
    json_response(
        StatusCode::BAD_REQUEST,
        &serde_json::json!({"error": message}),
    )
}

/// 404 for paths outside the API surface.
pub fn route_not_found() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::NOT_FOUND,
        &serde_json::json!({"error": "Not Found"}),
    )
}

/// 405 for known paths with an unsupported method.
pub fn method_not_allowed(allow: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header("Content-Type", "application/json")
        .header("Allow", allow)
        .body(Full::new(Bytes::from(
            r#"{"error":"Method Not Allowed"}"#,
        )))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Method Not Allowed"))))
}

/// 413 when Content-Length exceeds the configured limit.
pub fn payload_too_large() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::PAYLOAD_TOO_LARGE)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(
            r#"{"error":"Payload Too Large"}"#,
        )))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::from("Payload Too Large"))))
}

/// Preflight response: allow every method and whatever headers the
/// client asked for.
pub fn build_preflight_response(request_headers: &HeaderMap) -> Response<Full<Bytes>> {
    let requested_headers = request_headers
        .get("access-control-request-headers")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("*");

    Response::builder()
        .status(StatusCode::NO_CONTENT)
        .header("Access-Control-Allow-Methods", "GET, POST, PUT, DELETE, OPTIONS")
        .header("Access-Control-Allow-Headers", requested_headers)
        .header("Access-Control-Max-Age", "600")
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

/// Attach permissive credentialed CORS headers to a response.
///
/// `Allow-Origin: *` is incompatible with credentials, so the request
/// origin is echoed back instead, with `Vary: Origin` for caches.
pub fn apply_cors(response: &mut Response<Full<Bytes>>, request_headers: &HeaderMap) {
    let origin = request_headers
        .get("origin")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("*");

    let headers = response.headers_mut();
    if let Ok(value) = origin.parse() {
        headers.insert("Access-Control-Allow-Origin", value);
    }
    headers.insert(
        "Access-Control-Allow-Credentials",
        hyper::header::HeaderValue::from_static("true"),
    );
    headers.insert("Vary", hyper::header::HeaderValue::from_static("Origin"));
}
