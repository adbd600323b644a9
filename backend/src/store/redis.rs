use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client};
use shared::{SortOrder, Todo, TodoPatch};
use uuid::Uuid;

use super::{StoreError, StoreResult, TodoStore};

/// Redis-backed document store.
///
/// Each record is a JSON document at `{prefix}:{id}`. A sorted set at
/// `{prefix}:by_created` scores ids by creation time in microseconds and
/// drives the list ordering.
#[derive(Clone)]
pub struct RedisStore {
    conn: MultiplexedConnection,
    prefix: String,
}

impl RedisStore {
    /// Opens the long-lived connection shared by every request.
    pub async fn connect(url: &str, prefix: impl Into<String>) -> StoreResult<Self> {
        let client = Client::open(url)?;
        let conn = client.get_multiplexed_async_connection().await?;
        Ok(Self {
            conn,
            prefix: prefix.into(),
        })
    }

    fn record_key(&self, id: &str) -> String {
        format!("{}:{}", self.prefix, id)
    }

    fn index_key(&self) -> String {
        format!("{}:by_created", self.prefix)
    }

    fn score(todo: &Todo) -> f64 {
        todo.created_at.timestamp_micros() as f64
    }
}

impl TodoStore for RedisStore {
    async fn list(&self, order: SortOrder) -> StoreResult<Vec<Todo>> {
        let mut conn = self.conn.clone();
        let index = self.index_key();

        let ids: Vec<String> = match order {
            SortOrder::Asc => conn.zrange(&index, 0, -1).await?,
            SortOrder::Desc => conn.zrevrange(&index, 0, -1).await?,
        };
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let keys: Vec<String> = ids.iter().map(|id| self.record_key(id)).collect();
        let docs: Vec<Option<String>> = conn.mget(&keys).await?;

        let mut todos = Vec::with_capacity(docs.len());
        for (key, doc) in keys.iter().zip(docs) {
            // Deleted between the index read and the fetch.
            let Some(doc) = doc else {
                tracing::warn!(%key, "indexed todo has no document, skipping");
                continue;
            };
            todos.push(serde_json::from_str::<Todo>(&doc)?);
        }
        Ok(todos)
    }

    async fn get(&self, id: Uuid) -> StoreResult<Todo> {
        let mut conn = self.conn.clone();
        let doc: Option<String> = conn.get(self.record_key(&id.to_string())).await?;
        match doc {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn insert(&self, todo: Todo) -> StoreResult<Todo> {
        let mut conn = self.conn.clone();
        let id = todo.id.to_string();
        let json = serde_json::to_string(&todo)?;

        redis::pipe()
            .atomic()
            .set(self.record_key(&id), &json)
            .ignore()
            .zadd(self.index_key(), &id, Self::score(&todo))
            .ignore()
            .query_async::<_, ()>(&mut conn)
            .await?;

        Ok(todo)
    }

    async fn update(&self, id: Uuid, patch: TodoPatch) -> StoreResult<Todo> {
        let mut todo = self.get(id).await?;
        patch.apply_to(&mut todo);
        let json = serde_json::to_string(&todo)?;

        // XX keeps a concurrent delete from being undone by this write.
        let mut conn = self.conn.clone();
        let written: Option<String> = redis::cmd("SET")
            .arg(self.record_key(&id.to_string()))
            .arg(&json)
            .arg("XX")
            .query_async(&mut conn)
            .await?;

        match written {
            Some(_) => Ok(todo),
            None => Err(StoreError::NotFound(id)),
        }
    }

    async fn delete(&self, id: Uuid) -> StoreResult<()> {
        let mut conn = self.conn.clone();
        let member = id.to_string();

        let (deleted, _unindexed): (usize, usize) = redis::pipe()
            .atomic()
            .del(self.record_key(&member))
            .zrem(self.index_key(), &member)
            .query_async(&mut conn)
            .await?;

        if deleted > 0 {
            Ok(())
        } else {
            Err(StoreError::NotFound(id))
        }
    }
}
