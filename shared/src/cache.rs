//! Client-held copy of the todo collection.
//!
//! The list is replaced wholesale on every load or resort. Between loads it is
//! patched from mutation responses: creates are prepended, updates replace the
//! record with the same id, deletes remove it. Order is whatever the last load
//! returned, plus any prepended creates.
//!
//! Nothing here changes until the service answers. A request that fails leaves
//! the cache, and so every rendered row, exactly as it was.

use chrono::TimeZone;
use uuid::Uuid;

use crate::filter::SearchQuery;
use crate::todo::{SortOrder, Todo, TodoPatch};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoCache {
    todos: Vec<Todo>,
    sort: SortOrder,
}

impl TodoCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Order the next load should request.
    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Flips the requested order. The held list keeps its old order until the
    /// matching load arrives.
    pub fn toggle_sort(&mut self) -> SortOrder {
        self.sort = self.sort.toggled();
        self.sort
    }

    pub fn replace_all(&mut self, todos: Vec<Todo>) {
        self.todos = todos;
    }

    /// Applies a load fetched in `order`. Returns false, leaving the list
    /// alone, when the order has been toggled since that load was requested.
    pub fn load(&mut self, order: SortOrder, todos: Vec<Todo>) -> bool {
        if order != self.sort {
            return false;
        }
        self.replace_all(todos);
        true
    }

    /// Patch that flips the held record's completion flag.
    pub fn completion_patch(&self, id: Uuid) -> Option<TodoPatch> {
        self.get(id).map(|todo| TodoPatch::completed(!todo.completed))
    }

    /// New records go first regardless of the active sort order.
    pub fn prepend(&mut self, todo: Todo) {
        self.todos.retain(|t| t.id != todo.id);
        self.todos.insert(0, todo);
    }

    /// Returns false when no record with that id is held.
    pub fn replace(&mut self, updated: Todo) -> bool {
        match self.todos.iter_mut().find(|t| t.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: Uuid) -> Option<Todo> {
        let pos = self.todos.iter().position(|t| t.id == id)?;
        Some(self.todos.remove(pos))
    }

    pub fn get(&self, id: Uuid) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Todo> {
        self.todos.iter()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn visible<Tz: TimeZone>(&self, query: &SearchQuery, tz: &Tz) -> Vec<&Todo> {
        query.apply(&self.todos, tz)
    }
}
