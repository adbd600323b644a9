//! Runs against a live Redis only when `TEST_REDIS_URL` is set; each test uses
//! its own key prefix so runs do not collide.

use backend::{RedisStore, StoreError, TodoStore};
use pretty_assertions::assert_eq;
use shared::{SortOrder, Todo, TodoPatch};

struct Fixture {
    store: RedisStore,
    url: String,
    prefix: String,
}

async fn fixture() -> Option<Fixture> {
    let _ = dotenvy::dotenv();
    let url = std::env::var("TEST_REDIS_URL").ok()?;
    let prefix = format!("todo-test-{}", uuid::Uuid::new_v4());
    let store = RedisStore::connect(&url, prefix.clone())
        .await
        .expect("connect to TEST_REDIS_URL");
    Some(Fixture { store, url, prefix })
}

async fn store() -> Option<RedisStore> {
    fixture().await.map(|f| f.store)
}

#[tokio::test]
async fn round_trip_through_redis() {
    let Some(store) = store().await else {
        eprintln!("TEST_REDIS_URL not set, skipping");
        return;
    };

    let first = store.insert(Todo::new("first".into(), "1".into())).await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second = store.insert(Todo::new("second".into(), "2".into())).await.unwrap();

    let desc = store.list(SortOrder::Desc).await.unwrap();
    assert_eq!(desc, vec![second.clone(), first.clone()]);
    let asc = store.list(SortOrder::Asc).await.unwrap();
    assert_eq!(asc, vec![first.clone(), second.clone()]);

    let updated = store.update(first.id, TodoPatch::completed(true)).await.unwrap();
    assert!(updated.completed);
    assert_eq!(updated.text, "first");
    assert_eq!(store.get(first.id).await.unwrap(), updated);

    store.delete(first.id).await.unwrap();
    store.delete(second.id).await.unwrap();
    assert!(matches!(store.delete(first.id).await, Err(StoreError::NotFound(_))));
    assert!(matches!(
        store.update(first.id, TodoPatch::completed(false)).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(store.list(SortOrder::Asc).await.unwrap().is_empty());
}


#[tokio::test]
async fn corrupt_document_fails_list_like_get() {
    let Some(Fixture { store, url, prefix }) = fixture().await else {
        eprintln!("TEST_REDIS_URL not set, skipping");
        return;
    };

    let todo = store.insert(Todo::new("fine".into(), "ok".into())).await.unwrap();
    let client = redis::Client::open(url.as_str()).unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    redis::cmd("SET")
        .arg(format!("{}:{}", prefix, todo.id))
        .arg("{not json")
        .query_async::<_, ()>(&mut conn)
        .await
        .unwrap();

    assert!(matches!(store.get(todo.id).await, Err(StoreError::Document(_))));
    assert!(matches!(store.list(SortOrder::Desc).await, Err(StoreError::Document(_))));

    store.delete(todo.id).await.unwrap();
    assert!(store.list(SortOrder::Desc).await.unwrap().is_empty());
}
