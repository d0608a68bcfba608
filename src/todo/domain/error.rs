//! Error types for todo domain validation and parsing.

use super::TodoStatus;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors returned while constructing or validating todo values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TodoDomainError {
    /// The title is empty after trimming.
    #[error("todo title is required")]
    EmptyTitle,

    /// The trimmed title exceeds the maximum length.
    #[error("todo title must be at most {max} characters, got {actual}")]
    TitleTooLong {
        /// Maximum permitted character count.
        max: usize,
        /// Character count of the rejected title.
        actual: usize,
    },

    /// The due date could not be parsed as a calendar date.
    #[error("invalid due date '{0}'")]
    InvalidDueDate(String),

    /// The due date lies before the current date.
    #[error("due date {due} must not be before {today}")]
    DueDateInPast {
        /// Rejected due date.
        due: NaiveDate,
        /// Date the validation ran against.
        today: NaiveDate,
    },

    /// The owner identifier is empty.
    #[error("owner identifier must not be empty")]
    EmptyOwner,

    /// A restore was requested into a status other than active or completed.
    #[error("todos can only be restored as ACTIVE or COMPLETED, not {0}")]
    InvalidRestoreTarget(TodoStatus),
}

/// Error returned while parsing todo statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown todo status: {0}")]
pub struct ParseTodoStatusError(pub String);

/// Error returned while parsing todo priorities from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown todo priority: {0}")]
pub struct ParseTodoPriorityError(pub String);
