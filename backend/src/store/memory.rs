use std::collections::HashMap;
use std::sync::Arc;

use shared::{SortOrder, Todo, TodoPatch};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{StoreError, StoreResult, TodoStore};

/// Process-local store used by tests and by `STORE=memory` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    todos: Arc<RwLock<HashMap<Uuid, Todo>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TodoStore for MemoryStore {
    async fn list(&self, order: SortOrder) -> StoreResult<Vec<Todo>> {
        let mut todos: Vec<Todo> = self.todos.read().await.values().cloned().collect();
        todos.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        if order == SortOrder::Desc {
            todos.reverse();
        }
        Ok(todos)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Todo> {
        self.todos
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn insert(&self, todo: Todo) -> StoreResult<Todo> {
        self.todos.write().await.insert(todo.id, todo.clone());
        Ok(todo)
    }

    async fn update(&self, id: Uuid, patch: TodoPatch) -> StoreResult<Todo> {
        let mut todos = self.todos.write().await;
        let todo = todos.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        patch.apply_to(todo);
        Ok(todo.clone())
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        self.todos
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn at(text: &str, day: u32) -> Todo {
        Todo::with_created_at(
            text.into(),
            "d".into(),
            Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn list_orders_by_creation_time() {
        let store = MemoryStore::new();
        for (text, day) in [("b", 2), ("c", 3), ("a", 1)] {
            store.insert(at(text, day)).await.unwrap();
        }

        let asc: Vec<String> = store.list(SortOrder::Asc).await.unwrap().into_iter().map(|t| t.text).collect();
        let desc: Vec<String> = store.list(SortOrder::Desc).await.unwrap().into_iter().map(|t| t.text).collect();
        assert_eq!(asc, vec!["a", "b", "c"]);
        assert_eq!(desc, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn equal_timestamps_still_reverse_exactly() {
        let store = MemoryStore::new();
        for text in ["x", "y", "z", "w"] {
            store.insert(at(text, 7)).await.unwrap();
        }
        let asc = store.list(SortOrder::Asc).await.unwrap();
        let mut desc = store.list(SortOrder::Desc).await.unwrap();
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[tokio::test]
    async fn update_and_delete_unknown_ids() {
        let store = MemoryStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.update(id, TodoPatch::completed(true)).await,
            Err(StoreError::NotFound(missing)) if missing == id
        ));
        assert!(matches!(store.delete(id).await, Err(StoreError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_twice_reports_not_found() {
        let store = MemoryStore::new();
        let todo = store.insert(at("once", 1)).await.unwrap();
        store.delete(todo.id).await.unwrap();
        assert!(matches!(store.delete(todo.id).await, Err(StoreError::NotFound(_))));
        assert!(store.list(SortOrder::Desc).await.unwrap().is_empty());
    }
}
