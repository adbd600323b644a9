//! Types and client-side rules shared by the todo service and its web client.
//!
//! Everything here compiles for both the native backend and the `wasm32`
//! frontend, so the list/filter/dialog behavior the browser relies on is
//! unit tested natively.

pub mod cache;
pub mod dialog;
pub mod error;
pub mod filter;
pub mod todo;

pub use cache::TodoCache;
pub use dialog::{DialogMode, Draft, EditDialog, Submission};
pub use error::{ApiError, ApiErrorKind};
pub use filter::{display_date, SearchQuery};
pub use todo::{CreateTodoRequest, DeleteResponse, SortOrder, Todo, TodoPatch};

/// Base path of the todo collection resource.
pub const TODOS_PATH: &str = "/api/todos";

/// Path of a single todo addressed by identifier.
pub fn todo_path(id: uuid::Uuid) -> String {
    format!("{TODOS_PATH}/{id}")
}
