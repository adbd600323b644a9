//! Client-side search over the loaded todo list.
//!
//! The query never reaches the service. A record matches when the lowercased
//! query is a substring of its text, its description, its status word, or its
//! formatted creation date.

use chrono::{DateTime, Datelike, TimeZone, Utc};

use crate::todo::Todo;

/// Short month names as rendered by the `en-IN` locale.
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// Formats a creation time as `DD Mon YYYY` in the given time zone.
pub fn display_date<Tz: TimeZone>(created_at: &DateTime<Utc>, tz: &Tz) -> String {
    let local = created_at.with_timezone(tz);
    format!(
        "{:02} {} {}",
        local.day(),
        MONTHS[local.month0() as usize],
        local.year()
    )
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    keyword: Option<String>,
}

impl SearchQuery {
    /// A whitespace-only input disables filtering. Otherwise the input is
    /// lowercased as typed, surrounding spaces included.
    pub fn new(input: &str) -> Self {
        let keyword = if input.trim().is_empty() {
            None
        } else {
            Some(input.to_lowercase())
        };
        Self { keyword }
    }

    pub fn is_active(&self) -> bool {
        self.keyword.is_some()
    }

    pub fn matches<Tz: TimeZone>(&self, todo: &Todo, tz: &Tz) -> bool {
        let Some(keyword) = self.keyword.as_deref() else {
            return true;
        };
        let status = if todo.completed { "completed" } else { "pending" };

        todo.text.to_lowercase().contains(keyword)
            || todo.description.to_lowercase().contains(keyword)
            || status.contains(keyword)
            || display_date(&todo.created_at, tz)
                .to_lowercase()
                .contains(keyword)
    }

    pub fn apply<'a, Tz, I>(&self, todos: I, tz: &Tz) -> Vec<&'a Todo>
    where
        Tz: TimeZone,
        I: IntoIterator<Item = &'a Todo>,
    {
        todos.into_iter().filter(|t| self.matches(t, tz)).collect()
    }
}
