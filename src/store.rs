//! In-memory todo store
//!
//! Both collections are plain ordered vectors; every lookup is a linear
//! scan, which is fine at demo scale and keeps insertion order for the
//! endpoints that return whole collections. Ids come from per-collection
//! monotonic counters so a delete can never cause a later create to
//! collide with a surviving id.

use chrono::Utc;

use crate::models::{CreateUpdateTodoItem, CreateUpdateTodoList, TodoItem, TodoList};

/// Process-local storage for todo lists and their items.
///
/// Callers are expected to hold exclusive access for mutating operations;
/// the server wraps the store in a `tokio::sync::RwLock`.
pub struct TodoStore {
    lists: Vec<TodoList>,
    items: Vec<TodoItem>,
    next_list_id: u64,
    next_item_id: u64,
}

impl TodoStore {
    /// Create an empty store.
    pub const fn new() -> Self {
        Self {
            lists: Vec::new(),
            items: Vec::new(),
            next_list_id: 1,
            next_item_id: 1,
        }
    }

    /// Create a store with the startup sample data: one list ("1") and one
    /// incomplete item ("1") belonging to it.
    pub fn seeded() -> Self {
        let mut store = Self::new();

        let sample_list = store.create_list(&CreateUpdateTodoList {
            name: "My First Todo List".to_string(),
            description: Some("A sample todo list to get you started".to_string()),
        });
        store.create_item(
            &sample_list.id,
            &CreateUpdateTodoItem {
                name: "Learn about this Todo app".to_string(),
                description: Some("Explore the features of this todo application".to_string()),
                is_complete: false,
                list_id: None,
            },
        );

        store
    }

    /// All lists in insertion order.
    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn create_list(&mut self, data: &CreateUpdateTodoList) -> TodoList {
        let now = Utc::now();
        let list = TodoList {
            id: self.next_list_id.to_string(),
            name: data.name.clone(),
            description: data.description.clone(),
            created_date: now,
            updated_date: now,
        };
        self.next_list_id += 1;
        self.lists.push(list.clone());
        list
    }

    pub fn get_list(&self, list_id: &str) -> Option<&TodoList> {
        self.lists.iter().find(|l| l.id == list_id)
    }

    /// Overwrite name/description and refresh `updatedDate`.
    /// `createdDate` is untouched.
    pub fn update_list(&mut self, list_id: &str, data: &CreateUpdateTodoList) -> Option<TodoList> {
        let list = self.lists.iter_mut().find(|l| l.id == list_id)?;
        list.name = data.name.clone();
        list.description = data.description.clone();
        list.updated_date = Utc::now();
        Some(list.clone())
    }

    /// Remove a list and cascade-remove every item referencing it.
    pub fn delete_list(&mut self, list_id: &str) -> Option<TodoList> {
        let pos = self.lists.iter().position(|l| l.id == list_id)?;
        let deleted = self.lists.remove(pos);
        self.items.retain(|item| item.list_id != list_id);
        Some(deleted)
    }

    /// Items belonging to a list, in insertion order. The list itself is
    /// not checked for existence; an unknown id yields an empty vector.
    pub fn items_for_list(&self, list_id: &str) -> Vec<TodoItem> {
        self.items
            .iter()
            .filter(|item| item.list_id == list_id)
            .cloned()
            .collect()
    }

    /// Create an item under the given list id. The id is taken from the
    /// path, not the body; no check that the list exists.
    pub fn create_item(&mut self, list_id: &str, data: &CreateUpdateTodoItem) -> TodoItem {
        let item = TodoItem {
            id: self.next_item_id.to_string(),
            name: data.name.clone(),
            description: data.description.clone(),
            is_complete: data.is_complete,
            completed_date: data.is_complete.then(Utc::now),
            list_id: list_id.to_string(),
        };
        self.next_item_id += 1;
        self.items.push(item.clone());
        item
    }

    /// Update an item addressed by item id AND list id. A correct item id
    /// under the wrong list is not-found.
    pub fn update_item(
        &mut self,
        list_id: &str,
        item_id: &str,
        data: &CreateUpdateTodoItem,
    ) -> Option<TodoItem> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id && i.list_id == list_id)?;
        item.name = data.name.clone();
        item.description = data.description.clone();
        item.is_complete = data.is_complete;
        item.completed_date = data.is_complete.then(Utc::now);
        Some(item.clone())
    }

    /// Delete an item addressed by item id AND list id.
    pub fn delete_item(&mut self, list_id: &str, item_id: &str) -> Option<TodoItem> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id == item_id && i.list_id == list_id)?;
        Some(self.items.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_data(name: &str) -> CreateUpdateTodoList {
        CreateUpdateTodoList {
            name: name.to_string(),
            description: None,
        }
    }

    fn item_data(name: &str, is_complete: bool) -> CreateUpdateTodoItem {
        CreateUpdateTodoItem {
            name: name.to_string(),
            description: None,
            is_complete,
            list_id: None,
        }
    }

    #[test]
    fn test_seeded_store_contents() {
        let store = TodoStore::seeded();
        assert_eq!(store.lists().len(), 1);
        assert_eq!(store.lists()[0].id, "1");
        assert_eq!(store.lists()[0].name, "My First Todo List");

        let items = store.items_for_list("1");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "1");
        assert!(!items[0].is_complete);
        assert!(items[0].completed_date.is_none());
    }

    #[test]
    fn test_create_list_preserves_insertion_order() {
        let mut store = TodoStore::seeded();
        store.create_list(&list_data("Groceries"));
        store.create_list(&list_data("Chores"));

        let ids: Vec<&str> = store.lists().iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
        assert_eq!(store.lists()[1].name, "Groceries");
    }

    #[test]
    fn test_create_list_dates_equal_at_creation() {
        let mut store = TodoStore::new();
        let list = store.create_list(&list_data("Groceries"));
        assert_eq!(list.created_date, list.updated_date);
    }

    #[test]
    fn test_update_list_refreshes_updated_date_only() {
        let mut store = TodoStore::seeded();
        let created = store.get_list("1").unwrap().created_date;

        std::thread::sleep(std::time::Duration::from_millis(2));
        let updated = store
            .update_list("1", &list_data("Renamed"))
            .expect("list exists");

        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.created_date, created);
        assert!(updated.updated_date > created);
    }

    #[test]
    fn test_update_unknown_list_is_none() {
        let mut store = TodoStore::seeded();
        assert!(store.update_list("99", &list_data("x")).is_none());
    }

    #[test]
    fn test_delete_list_cascades_to_items() {
        let mut store = TodoStore::seeded();
        let list = store.create_list(&list_data("Groceries"));
        store.create_item(&list.id, &item_data("Milk", false));
        store.create_item(&list.id, &item_data("Eggs", false));
        // Item in another list must survive
        store.create_item("1", &item_data("Unrelated", false));

        let deleted = store.delete_list(&list.id).expect("list exists");
        assert_eq!(deleted.id, list.id);
        assert!(store.get_list(&list.id).is_none());
        assert!(store.items_for_list(&list.id).is_empty());
        assert_eq!(store.items_for_list("1").len(), 2);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut store = TodoStore::seeded();
        let second = store.create_list(&list_data("Groceries"));
        assert_eq!(second.id, "2");

        store.delete_list(&second.id).unwrap();
        let third = store.create_list(&list_data("Chores"));
        // A length-based counter would hand out "2" again here
        assert_eq!(third.id, "3");
    }

    #[test]
    fn test_item_ids_count_independently() {
        let mut store = TodoStore::seeded();
        let item = store.create_item("1", &item_data("Milk", false));
        assert_eq!(item.id, "2");

        store.delete_item("1", &item.id).unwrap();
        let next = store.create_item("1", &item_data("Eggs", false));
        assert_eq!(next.id, "3");
    }

    #[test]
    fn test_complete_item_gets_completed_date() {
        let mut store = TodoStore::new();
        let done = store.create_item("1", &item_data("Milk", true));
        assert!(done.completed_date.is_some());

        let pending = store.create_item("1", &item_data("Eggs", false));
        assert!(pending.completed_date.is_none());
    }

    #[test]
    fn test_update_item_recomputes_completed_date() {
        let mut store = TodoStore::new();
        let item = store.create_item("1", &item_data("Milk", false));
        assert!(item.completed_date.is_none());

        let done = store
            .update_item("1", &item.id, &item_data("Milk", true))
            .unwrap();
        assert!(done.completed_date.is_some());

        let undone = store
            .update_item("1", &item.id, &item_data("Milk", false))
            .unwrap();
        assert!(undone.completed_date.is_none());
    }

    #[test]
    fn test_item_requires_matching_list_id() {
        let mut store = TodoStore::seeded();
        let other = store.create_list(&list_data("Groceries"));

        // Item "1" lives in list "1", not in the new list
        assert!(store.update_item(&other.id, "1", &item_data("x", false)).is_none());
        assert!(store.delete_item(&other.id, "1").is_none());
        assert!(store.delete_item("1", "1").is_some());
    }

    #[test]
    fn test_items_for_unknown_list_is_empty() {
        let store = TodoStore::seeded();
        assert!(store.items_for_list("42").is_empty());
    }

    #[test]
    fn test_create_item_ignores_body_list_id() {
        // The path segment decides ownership; a conflicting listId in the
        // body is accepted and discarded
        let mut store = TodoStore::seeded();
        let item = store.create_item(
            "1",
            &CreateUpdateTodoItem {
                name: "Milk".to_string(),
                description: None,
                is_complete: false,
                list_id: Some("9".to_string()),
            },
        );

        assert_eq!(item.list_id, "1");
        assert_eq!(store.items_for_list("1").len(), 2);
        assert!(store.items_for_list("9").is_empty());
    }

    #[test]
    fn test_item_can_reference_missing_list() {
        // No referential integrity at write time
        let mut store = TodoStore::new();
        let orphan = store.create_item("99", &item_data("Ghost", false));
        assert_eq!(orphan.list_id, "99");
        assert_eq!(store.items_for_list("99").len(), 1);
    }

    #[test]
    fn test_end_to_end_trace() {
        // POST /lists -> "2", POST items -> "2", cascade delete empties it
        let mut store = TodoStore::seeded();

        let groceries = store.create_list(&list_data("Groceries"));
        assert_eq!(groceries.id, "2");

        let milk = store.create_item(&groceries.id, &item_data("Milk", false));
        assert_eq!(milk.id, "2");
        assert_eq!(milk.list_id, "2");
        assert!(!milk.is_complete);

        assert_eq!(store.items_for_list("2").len(), 1);
        store.delete_list("2").unwrap();
        assert!(store.items_for_list("2").is_empty());
    }
}
