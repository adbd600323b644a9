mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use common::{create_todo, get, patch_json, test_app};

#[tokio::test]
async fn toggle_completed_leaves_other_fields() {
    let app = test_app();
    let created = create_todo(&app, "A", "B").await;
    let uri = format!("/api/todos/{}", created["_id"].as_str().unwrap());

    let (status, updated) = patch_json(&app, &uri, &json!({ "completed": true })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["text"], created["text"]);
    assert_eq!(updated["description"], created["description"]);
    assert_eq!(updated["createdAt"], created["createdAt"]);
    assert_eq!(updated["_id"], created["_id"]);
}

#[tokio::test]
async fn partial_update_changes_only_named_fields() {
    let app = test_app();
    let created = create_todo(&app, "Original", "keep me").await;
    let uri = format!("/api/todos/{}", created["_id"].as_str().unwrap());

    let (status, updated) = patch_json(&app, &uri, &json!({ "text": "Renamed" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["text"], "Renamed");
    assert_eq!(updated["description"], "keep me");
    assert_eq!(updated["completed"], false);

    let (_, fetched) = get(&app, &uri).await;
    assert_eq!(fetched, updated);
}

#[tokio::test]
async fn empty_patch_returns_record_unchanged() {
    let app = test_app();
    let created = create_todo(&app, "same", "same").await;
    let uri = format!("/api/todos/{}", created["_id"].as_str().unwrap());

    let (status, updated) = patch_json(&app, &uri, &json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated, created);
}

#[tokio::test]
async fn update_unknown_id_is_not_found() {
    let app = test_app();
    let uri = format!("/api/todos/{}", uuid::Uuid::new_v4());
    let (status, err) = patch_json(&app, &uri, &json!({ "completed": true })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err["kind"], "NotFound");
}

#[tokio::test]
async fn update_with_unknown_field_is_bad_request() {
    let app = test_app();
    let created = create_todo(&app, "A", "B").await;
    let uri = format!("/api/todos/{}", created["_id"].as_str().unwrap());

    let (status, err) = patch_json(&app, &uri, &json!({ "title": "wrong key" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["kind"], "BadRequest");
}

#[tokio::test]
async fn update_to_blank_text_is_validation_error() {
    let app = test_app();
    let created = create_todo(&app, "A", "B").await;
    let uri = format!("/api/todos/{}", created["_id"].as_str().unwrap());

    let (status, err) = patch_json(&app, &uri, &json!({ "text": "  " })).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(err["kind"], "ValidationError");

    let (_, fetched) = get(&app, &uri).await;
    assert_eq!(fetched["text"], "A");
}

#[tokio::test]
async fn malformed_id_is_bad_request() {
    let app = test_app();
    let (status, err) = patch_json(&app, "/api/todos/not-a-uuid", &json!({ "completed": true })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["kind"], "BadRequest");
}
