//! Service-level errors for todo operations.

use crate::todo::{
    domain::{TodoDomainError, TodoId},
    ports::TodoRepositoryError,
};
use thiserror::Error;

/// Coarse classification of a [`TodoServiceError`] for transport mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad caller input.
    Validation,
    /// No matching owned record, or a purge the caller may not perform.
    NotFound,
    /// Transition blocked by the current status.
    Conflict,
    /// Existence was confirmed but the write matched nothing.
    UpdateFailed,
    /// Permanent purge refused.
    NotAllowed,
    /// Persistence collaborator failed.
    StoreUnavailable,
}

impl ErrorKind {
    /// Returns the HTTP status code a transport should answer with.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Validation => 400,
            Self::NotFound | Self::NotAllowed => 404,
            Self::Conflict => 409,
            Self::UpdateFailed | Self::StoreUnavailable => 500,
        }
    }
}

/// Service-level errors for todo lifecycle and trash operations.
///
/// Messages for missing and non-purgeable todos never say whether the todo
/// exists, belongs to another owner, or is still inside the retention window.
#[derive(Debug, Error)]
pub enum TodoServiceError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] TodoDomainError),
    /// No owned todo matched.
    #[error("todo {0} not found")]
    NotFound(TodoId),
    /// The todo is already completed or deleted.
    #[error("todo {0} is already completed or deleted")]
    Conflict(TodoId),
    /// The todo is in the trash and must be restored before editing.
    #[error("todo {0} is deleted; restore it before editing")]
    EditDeleted(TodoId),
    /// The todo was found but the update matched no row.
    #[error("failed to update todo {0}")]
    UpdateFailed(TodoId),
    /// No todo satisfied the conditions for permanent deletion.
    #[error("todo {0} cannot be permanently deleted")]
    NotAllowed(TodoId),
    /// The persistence collaborator failed.
    #[error("todo store unavailable: {0}")]
    StoreUnavailable(#[from] TodoRepositoryError),
}

impl TodoServiceError {
    /// Returns the error's classification.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) | Self::EditDeleted(_) => ErrorKind::Conflict,
            Self::UpdateFailed(_) => ErrorKind::UpdateFailed,
            Self::NotAllowed(_) => ErrorKind::NotAllowed,
            Self::StoreUnavailable(_) => ErrorKind::StoreUnavailable,
        }
    }
}

/// Result type for todo service operations.
pub type TodoServiceResult<T> = Result<T, TodoServiceError>;
