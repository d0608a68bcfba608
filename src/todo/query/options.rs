//! Raw list options as received from a caller.

use super::{
    SortDirection, SortField,
    lenient::{lenient, lenient_integer, non_blank},
};
use crate::todo::domain::{TodoPriority, TodoStatus};
use chrono::NaiveDate;
use serde::Deserialize;

/// Unsanitised options for listing an owner's todos.
///
/// Deserialises from a camelCase query string or JSON object. Every field is
/// optional and values that cannot be interpreted are dropped rather than
/// rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListTodosOptions {
    /// Exact status filter.
    #[serde(deserialize_with = "lenient")]
    pub status: Option<TodoStatus>,
    /// Exact priority filter.
    #[serde(deserialize_with = "lenient")]
    pub priority: Option<TodoPriority>,
    /// Inclusive lower bound on the due date.
    #[serde(deserialize_with = "lenient")]
    pub due_date_from: Option<NaiveDate>,
    /// Inclusive upper bound on the due date.
    #[serde(deserialize_with = "lenient")]
    pub due_date_to: Option<NaiveDate>,
    /// Case-insensitive substring matched against title or description.
    #[serde(deserialize_with = "non_blank")]
    pub search: Option<String>,
    /// Whether soft-deleted todos are listed.
    #[serde(deserialize_with = "lenient")]
    pub include_deleted: Option<bool>,
    /// Primary sort key.
    #[serde(deserialize_with = "lenient")]
    pub sort_by: Option<SortField>,
    /// Primary sort direction.
    #[serde(deserialize_with = "lenient")]
    pub sort_direction: Option<SortDirection>,
    /// Requested page size.
    #[serde(deserialize_with = "lenient_integer")]
    pub limit: Option<i64>,
    /// Requested number of records to skip.
    #[serde(deserialize_with = "lenient_integer")]
    pub offset: Option<i64>,
}

impl ListTodosOptions {
    /// Creates options with every field absent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by status.
    #[must_use]
    pub const fn with_status(mut self, status: TodoStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filters by priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TodoPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts due dates to the inclusive range `from..=to`.
    #[must_use]
    pub const fn with_due_date_range(
        mut self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Self {
        self.due_date_from = from;
        self.due_date_to = to;
        self
    }

    /// Filters by a search term.
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Includes soft-deleted todos.
    #[must_use]
    pub const fn including_deleted(mut self) -> Self {
        self.include_deleted = Some(true);
        self
    }

    /// Sets the primary sort.
    #[must_use]
    pub const fn sorted_by(mut self, field: SortField, direction: SortDirection) -> Self {
        self.sort_by = Some(field);
        self.sort_direction = Some(direction);
        self
    }

    /// Sets the page window.
    #[must_use]
    pub const fn with_window(mut self, limit: i64, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}
