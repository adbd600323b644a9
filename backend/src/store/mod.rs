//! Persistence seam for todo records.
//!
//! Handlers are generic over [`TodoStore`]; production runs against Redis and
//! tests run against the in-memory store. Ordering is a query-time concern:
//! both stores order by `createdAt` and break ties by identifier, so `asc` and
//! `desc` listings are exact reverses of each other.

use std::future::Future;

use shared::{SortOrder, Todo, TodoPatch};
use thiserror::Error;
use uuid::Uuid;

pub mod memory;
pub mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(Uuid),
    #[error("redis error: {0}")]
    Redis(#[from] ::redis::RedisError),
    #[error("couldn't encode or decode todo document: {0}")]
    Document(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait TodoStore: Clone + Send + Sync + 'static {
    fn list(&self, order: SortOrder) -> impl Future<Output = StoreResult<Vec<Todo>>> + Send;

    fn get(&self, id: Uuid) -> impl Future<Output = StoreResult<Todo>> + Send;

    /// Persists a freshly built record and returns it as stored.
    fn insert(&self, todo: Todo) -> impl Future<Output = StoreResult<Todo>> + Send;

    /// Merges the supplied fields onto the stored record. Last write wins.
    fn update(
        &self,
        id: Uuid,
        patch: TodoPatch,
    ) -> impl Future<Output = StoreResult<Todo>> + Send;

    fn delete(&self, id: Uuid) -> impl Future<Output = StoreResult<()>> + Send;
}
