//! The add/edit dialog.
//!
//! One form serves both create and edit. States are `Closed` and `Open`; an
//! open dialog carries its mode and the draft being typed.

use uuid::Uuid;

use crate::error::ApiError;
use crate::todo::{CreateTodoRequest, Todo, TodoPatch};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub text: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(Uuid),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditDialog {
    #[default]
    Closed,
    Open { mode: DialogMode, draft: Draft },
}

/// The request a submitted dialog turns into.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(CreateTodoRequest),
    Update { id: Uuid, patch: TodoPatch },
}

impl EditDialog {
    /// Opens an empty form. Ignored while the dialog is already open.
    pub fn open_create(&mut self) {
        if self.is_open() {
            return;
        }
        *self = EditDialog::Open {
            mode: DialogMode::Create,
            draft: Draft::default(),
        };
    }

    /// Opens the form prefilled from an existing record.
    pub fn open_edit(&mut self, todo: &Todo) {
        if self.is_open() {
            return;
        }
        *self = EditDialog::Open {
            mode: DialogMode::Edit(todo.id),
            draft: Draft {
                text: todo.text.clone(),
                description: todo.description.clone(),
            },
        };
    }

    /// Cancel and successful submit both land here; the draft is discarded.
    pub fn close(&mut self) {
        *self = EditDialog::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self, EditDialog::Open { .. })
    }

    pub fn mode(&self) -> Option<DialogMode> {
        match self {
            EditDialog::Open { mode, .. } => Some(*mode),
            EditDialog::Closed => None,
        }
    }

    pub fn draft(&self) -> Option<&Draft> {
        match self {
            EditDialog::Open { draft, .. } => Some(draft),
            EditDialog::Closed => None,
        }
    }

    pub fn set_text(&mut self, text: String) {
        if let EditDialog::Open { draft, .. } = self {
            draft.text = text;
        }
    }

    pub fn set_description(&mut self, description: String) {
        if let EditDialog::Open { draft, .. } = self {
            draft.description = description;
        }
    }

    /// Builds the request for the current draft. Both fields are required in
    /// either mode. Returns `None` when the dialog is closed.
    pub fn submission(&self) -> Option<Result<Submission, ApiError>> {
        let EditDialog::Open { mode, draft } = self else {
            return None;
        };
        let request = CreateTodoRequest::new(draft.text.clone(), draft.description.clone());
        if let Err(err) = request.validate() {
            return Some(Err(err));
        }
        let submission = match mode {
            DialogMode::Create => Submission::Create(request),
            DialogMode::Edit(id) => Submission::Update {
                id: *id,
                patch: TodoPatch::content(request.text, request.description),
            },
        };
        Some(Ok(submission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn create_flow() {
        let mut dialog = EditDialog::default();
        assert!(dialog.submission().is_none());

        dialog.open_create();
        assert_eq!(dialog.mode(), Some(DialogMode::Create));
        dialog.set_text("A".into());
        dialog.set_description("B".into());

        let submission = dialog.submission().unwrap().unwrap();
        assert_eq!(submission, Submission::Create(CreateTodoRequest::new("A", "B")));

        dialog.close();
        assert_eq!(dialog, EditDialog::Closed);
    }

    #[test]
    fn edit_flow_prefills_and_patches_content() {
        let todo = Todo::new("Buy milk".into(), "urgent".into());
        let mut dialog = EditDialog::default();
        dialog.open_edit(&todo);

        assert_eq!(dialog.mode(), Some(DialogMode::Edit(todo.id)));
        assert_eq!(dialog.draft().unwrap().text, "Buy milk");

        dialog.set_description("tomorrow".into());
        let submission = dialog.submission().unwrap().unwrap();
        assert_eq!(
            submission,
            Submission::Update {
                id: todo.id,
                patch: TodoPatch::content("Buy milk", "tomorrow"),
            }
        );
    }

    #[test]
    fn blank_fields_block_submission() {
        let mut dialog = EditDialog::default();
        dialog.open_create();
        dialog.set_text("title only".into());
        let err = dialog.submission().unwrap().unwrap_err();
        assert!(err.field_errors.contains_key("description"));
        assert!(dialog.is_open());
    }

    #[test]
    fn cancel_discards_draft() {
        let mut dialog = EditDialog::default();
        dialog.open_create();
        dialog.set_text("half typed".into());
        dialog.close();
        dialog.open_create();
        assert_eq!(dialog.draft(), Some(&Draft::default()));
    }

    #[test]
    fn opening_while_open_keeps_current_form() {
        let todo = Todo::new("x".into(), "y".into());
        let mut dialog = EditDialog::default();
        dialog.open_create();
        dialog.open_edit(&todo);
        assert_eq!(dialog.mode(), Some(DialogMode::Create));
    }

    #[test]
    fn edits_while_closed_are_ignored() {
        let mut dialog = EditDialog::default();
        dialog.set_text("nope".into());
        assert_eq!(dialog, EditDialog::Closed);
    }
}
