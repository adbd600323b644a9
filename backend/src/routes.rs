use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use shared::{ApiError, CreateTodoRequest, DeleteResponse, SortOrder, Todo, TodoPatch, TODOS_PATH};
use uuid::Uuid;

use crate::error::{json_rejection, query_rejection};
use crate::store::TodoStore;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub sort: Option<String>,
}

pub fn router<S: TodoStore>() -> Router<S> {
    Router::new()
        .route(TODOS_PATH, get(list_todos::<S>).post(create_todo::<S>))
        .route(
            &format!("{TODOS_PATH}/:id"),
            get(get_todo::<S>)
                .patch(update_todo::<S>)
                .delete(delete_todo::<S>),
        )
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid todo id '{raw}'")))
}

async fn list_todos<S: TodoStore>(
    State(store): State<S>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let Query(params) = params.map_err(query_rejection)?;
    let order = match params.sort.as_deref() {
        Some(raw) => raw.parse::<SortOrder>()?,
        None => SortOrder::default(),
    };

    let todos = store.list(order).await?;
    tracing::debug!(count = todos.len(), %order, "listed todos");
    Ok(Json(todos))
}

async fn create_todo<S: TodoStore>(
    State(store): State<S>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(payload) = payload.map_err(json_rejection)?;
    payload.validate()?;

    let todo = store.insert(payload.into_todo()).await?;
    tracing::info!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo<S: TodoStore>(
    State(store): State<S>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(store.get(id).await?))
}

async fn update_todo<S: TodoStore>(
    State(store): State<S>,
    Path(id): Path<String>,
    payload: Result<Json<TodoPatch>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id)?;
    let Json(patch) = payload.map_err(json_rejection)?;
    patch.validate()?;

    let todo = store.update(id, patch).await?;
    tracing::info!(id = %todo.id, completed = todo.completed, "updated todo");
    Ok(Json(todo))
}

async fn delete_todo<S: TodoStore>(
    State(store): State<S>,
    Path(id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_id(&id)?;
    store.delete(id).await?;
    tracing::info!(%id, "deleted todo");
    Ok(Json(DeleteResponse::deleted(id)))
}
