use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiErrorKind {
    BadRequest,
    ValidationError,
    NotFound,
    StoreError,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::BadRequest => write!(f, "BadRequest"),
            ApiErrorKind::ValidationError => write!(f, "ValidationError"),
            ApiErrorKind::NotFound => write!(f, "NotFound"),
            ApiErrorKind::StoreError => write!(f, "StoreError"),
        }
    }
}

/// Error body returned by the service and understood by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub field_errors: HashMap<String, String>,
}

impl ApiError {
    fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            field_errors: HashMap::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::NotFound, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::StoreError, message)
    }

    pub fn validation(message: impl Into<String>, field_errors: HashMap<String, String>) -> Self {
        Self {
            kind: ApiErrorKind::ValidationError,
            message: message.into(),
            field_errors,
        }
    }

    /// Parse an error body received from the service.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    /// Message suitable for a notification: the service message when the body
    /// parses, otherwise a generic fallback.
    pub fn friendly_message(body: &str) -> String {
        match Self::from_body(body) {
            Some(err) => err.user_message(),
            None => "Something went wrong. Please try again.".to_string(),
        }
    }

    /// The message plus any per-field messages, for display.
    pub fn user_message(&self) -> String {
        if self.field_errors.is_empty() {
            return self.message.clone();
        }
        let mut fields: Vec<&str> = self.field_errors.values().map(String::as_str).collect();
        fields.sort_unstable();
        format!("{}: {}", self.message, fields.join(", "))
    }

    pub fn status_code_u16(&self) -> u16 {
        match self.kind {
            ApiErrorKind::BadRequest => 400,
            ApiErrorKind::NotFound => 404,
            ApiErrorKind::ValidationError => 422,
            ApiErrorKind::StoreError => 500,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(feature = "server")]
impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = axum::http::StatusCode::from_u16(self.status_code_u16())
            .unwrap_or(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        (status, axum::Json(self)).into_response()
    }
}
