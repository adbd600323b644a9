#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use backend::{app, MemoryStore};
use serde_json::Value;
use tower::ServiceExt;

/// Router over a fresh in-memory store, API only.
pub fn test_app() -> Router {
    app(MemoryStore::new(), None)
}

pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

async fn with_json(app: &Router, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

pub async fn post_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    with_json(app, "POST", uri, body).await
}

pub async fn patch_json(app: &Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    with_json(app, "PATCH", uri, body).await
}

/// Creates a todo and returns the response body, asserting success.
pub async fn create_todo(app: &Router, text: &str, description: &str) -> Value {
    let body = serde_json::json!({ "text": text, "description": description });
    let (status, created) = post_json(app, "/api/todos", &body).await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    // Keeps createdAt strictly increasing between consecutive creates.
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    created
}

pub fn ids(list: &Value) -> Vec<String> {
    list.as_array()
        .expect("list response is an array")
        .iter()
        .map(|t| t["_id"].as_str().unwrap().to_string())
        .collect()
}
