//! Entity and request payload types
//!
//! Wire format uses camelCase field names and RFC 3339 timestamps,
//! matching the JSON shapes the web frontend expects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named collection grouping zero or more todo items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// A single todo entry belonging to exactly one list.
///
/// `completed_date` is present iff the item was complete at its last
/// create/update, and omitted from JSON otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    pub list_id: String,
}

/// Request body for creating or updating a list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateTodoList {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for creating or updating an item.
///
/// Clients may send `listId` in the body; the path segment always wins,
/// so the field is accepted and ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUpdateTodoItem {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    #[allow(dead_code)]
    pub list_id: Option<String>,
}
