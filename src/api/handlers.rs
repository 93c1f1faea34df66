//! Request handlers, one per operation
//!
//! Each handler maps directly onto a store operation. Lookup misses are
//! signaled through a 200-status error body rather than a 4xx status;
//! see `response::list_not_found`.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::response::{bad_request, item_not_found, json_response, list_not_found};
use crate::config::AppState;
use crate::models::{CreateUpdateTodoItem, CreateUpdateTodoList};

/// `GET /` - health check.
pub fn handle_root() -> Response<Full<Bytes>> {
    json_response(
        StatusCode::OK,
        &serde_json::json!({"message": "Todo API is running!"}),
    )
}

/// `GET /lists` - all lists in insertion order.
pub async fn handle_get_lists(state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let store = state.store.read().await;
    json_response(StatusCode::OK, &store.lists())
}

/// `POST /lists` - create a list.
pub async fn handle_create_list(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let data: CreateUpdateTodoList = match read_json_body(req).await {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    let mut store = state.store.write().await;
    let created = store.create_list(&data);
    json_response(StatusCode::OK, &created)
}

/// `GET /lists/{listId}`.
pub async fn handle_get_list(state: &Arc<AppState>, list_id: &str) -> Response<Full<Bytes>> {
    let store = state.store.read().await;
    match store.get_list(list_id) {
        Some(list) => json_response(StatusCode::OK, list),
        None => list_not_found(),
    }
}

/// `PUT /lists/{listId}` - overwrite name/description, refresh updatedDate.
pub async fn handle_update_list(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
    list_id: &str,
) -> Response<Full<Bytes>> {
    let data: CreateUpdateTodoList = match read_json_body(req).await {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    let mut store = state.store.write().await;
    match store.update_list(list_id, &data) {
        Some(updated) => json_response(StatusCode::OK, &updated),
        None => list_not_found(),
    }
}

/// `DELETE /lists/{listId}` - remove the list and cascade to its items.
pub async fn handle_delete_list(state: &Arc<AppState>, list_id: &str) -> Response<Full<Bytes>> {
    let mut store = state.store.write().await;
    match store.delete_list(list_id) {
        Some(deleted) => json_response(StatusCode::OK, &deleted),
        None => list_not_found(),
    }
}

/// `GET /lists/{listId}/items` - items of one list. No existence check on
/// the list itself; an unknown id yields an empty array.
pub async fn handle_get_items(state: &Arc<AppState>, list_id: &str) -> Response<Full<Bytes>> {
    let store = state.store.read().await;
    json_response(StatusCode::OK, &store.items_for_list(list_id))
}

/// `POST /lists/{listId}/items` - create an item under the path's list id.
pub async fn handle_create_item(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
    list_id: &str,
) -> Response<Full<Bytes>> {
    let data: CreateUpdateTodoItem = match read_json_body(req).await {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    let mut store = state.store.write().await;
    let created = store.create_item(list_id, &data);
    json_response(StatusCode::OK, &created)
}

/// `PUT /lists/{listId}/items/{itemId}` - both ids must match.
pub async fn handle_update_item(
    req: Request<hyper::body::Incoming>,
    state: &Arc<AppState>,
    list_id: &str,
    item_id: &str,
) -> Response<Full<Bytes>> {
    let data: CreateUpdateTodoItem = match read_json_body(req).await {
        Ok(d) => d,
        Err(resp) => return resp,
    };

    let mut store = state.store.write().await;
    match store.update_item(list_id, item_id, &data) {
        Some(updated) => json_response(StatusCode::OK, &updated),
        None => item_not_found(),
    }
}

/// `DELETE /lists/{listId}/items/{itemId}` - both ids must match.
pub async fn handle_delete_item(
    state: &Arc<AppState>,
    list_id: &str,
    item_id: &str,
) -> Response<Full<Bytes>> {
    let mut store = state.store.write().await;
    match store.delete_item(list_id, item_id) {
        Some(deleted) => json_response(StatusCode::OK, &deleted),
        None => item_not_found(),
    }
}

/// Collect the request body and deserialize it, rejecting unreadable or
/// shape-invalid payloads with a 400 before any handler logic runs.
async fn read_json_body<T: DeserializeOwned>(
    req: Request<hyper::body::Incoming>,
) -> Result<T, Response<Full<Bytes>>> {
    let whole_body = match req.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => return Err(bad_request("Failed to read request body")),
    };

    serde_json::from_slice(&whole_body).map_err(|e| bad_request(&format!("Invalid JSON: {e}")))
}
