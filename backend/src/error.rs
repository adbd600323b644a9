use axum::extract::rejection::{JsonRejection, QueryRejection};
use shared::ApiError;

use crate::store::StoreError;

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::not_found(format!("Todo {id} not found")),
            other => {
                tracing::error!(error = %other, "todo store failure");
                ApiError::store("The todo store is unavailable")
            }
        }
    }
}

pub fn json_rejection(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}

pub fn query_rejection(rejection: QueryRejection) -> ApiError {
    ApiError::bad_request(rejection.body_text())
}
