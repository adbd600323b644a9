use serde::de::DeserializeOwned;
use shared::{
    todo_path, ApiError, CreateTodoRequest, DeleteResponse, SortOrder, Todo, TodoPatch, TODOS_PATH,
};
use uuid::Uuid;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

pub async fn fetch_todos(sort: SortOrder) -> Result<Vec<Todo>, String> {
    send("GET", &format!("{TODOS_PATH}?sort={sort}"), None).await
}

pub async fn create_todo(request: &CreateTodoRequest) -> Result<Todo, String> {
    let body = serde_json::to_string(request).map_err(|_| "Failed to serialize request")?;
    send("POST", TODOS_PATH, Some(body)).await
}

pub async fn update_todo(id: Uuid, patch: &TodoPatch) -> Result<Todo, String> {
    let body = serde_json::to_string(patch).map_err(|_| "Failed to serialize request")?;
    send("PATCH", &todo_path(id), Some(body)).await
}

pub async fn delete_todo(id: Uuid) -> Result<DeleteResponse, String> {
    send("DELETE", &todo_path(id), None).await
}

/// Issues one request and decodes the JSON reply. Non-2xx replies become the
/// service's error message.
async fn send<T: DeserializeOwned>(method: &str, url: &str, body: Option<String>) -> Result<T, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request =
        Request::new_with_str_and_init(url, &opts).map_err(|_| "Failed to create request")?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|_| "Failed to set header")?;
    }

    let window = web_sys::window().ok_or("No browser window")?;
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| "Could not reach the server")?
        .into();

    let text_promise = response.text().map_err(|_| "Failed to read response")?;
    let text = JsFuture::from(text_promise)
        .await
        .map_err(|_| "Failed to get text")?
        .as_string()
        .ok_or("Failed to convert to string")?;

    if !response.ok() {
        return Err(ApiError::friendly_message(&text));
    }
    serde_json::from_str(&text).map_err(|e| format!("Failed to parse JSON: {}", e))
}
