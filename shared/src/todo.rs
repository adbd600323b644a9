use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

/// A single persisted task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub text: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Todo {
    /// Builds a fresh record with a new identifier, stamped with the current time.
    pub fn new(text: String, description: String) -> Self {
        Self::with_created_at(text, description, Utc::now())
    }

    pub fn with_created_at(text: String, description: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            description,
            completed: false,
            created_at,
        }
    }

    /// Label shown in the status column.
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }
}

/// Body of `POST /api/todos`.
///
/// Missing fields deserialize as empty strings so that absence and blankness
/// are both reported through [`CreateTodoRequest::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub description: String,
}

impl CreateTodoRequest {
    pub fn new(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            description: description.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        require_non_blank(&mut field_errors, "text", Some(self.text.as_str()));
        require_non_blank(&mut field_errors, "description", Some(self.description.as_str()));
        into_validation_result(field_errors)
    }

    pub fn into_todo(self) -> Todo {
        Todo::new(self.text, self.description)
    }
}

/// Body of `PATCH /api/todos/:id`. Only the supplied fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TodoPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Patch touching only the completion flag.
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    /// Patch replacing title and description, as sent by the edit dialog.
    pub fn content(text: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            description: Some(description.into()),
            completed: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Supplied text fields must not be blank; absent ones are fine.
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();
        if self.text.is_some() {
            require_non_blank(&mut field_errors, "text", self.text.as_deref());
        }
        if self.description.is_some() {
            require_non_blank(&mut field_errors, "description", self.description.as_deref());
        }
        into_validation_result(field_errors)
    }

    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(text) = &self.text {
            todo.text = text.clone();
        }
        if let Some(description) = &self.description {
            todo.description = description.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }
}

fn require_non_blank(errors: &mut HashMap<String, String>, field: &str, value: Option<&str>) {
    if value.map_or(true, |v| v.trim().is_empty()) {
        errors.insert(field.to_string(), format!("{field} is required"));
    }
}

fn into_validation_result(field_errors: HashMap<String, String>) -> Result<(), ApiError> {
    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation("Validation failed", field_errors))
    }
}

/// Direction of the `createdAt` ordering applied by the list query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ApiError::bad_request(format!(
                "Invalid sort order '{other}', expected 'asc' or 'desc'"
            ))),
        }
    }
}

/// Body returned by `DELETE /api/todos/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub message: String,
    #[serde(rename = "_id")]
    pub id: Uuid,
}

impl DeleteResponse {
    pub fn deleted(id: Uuid) -> Self {
        Self {
            message: "Todo deleted successfully".to_string(),
            id,
        }
    }
}
