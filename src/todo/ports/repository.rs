//! Repository port for todo persistence.
//!
//! Every state change is a single conditional write keyed on the todo
//! identifier, the owner, and a predicate over the current state. An adapter
//! reports a predicate miss as `None` (or `false`, or zero) rather than as an
//! error, so two concurrent requests on the same todo cannot both succeed.

use crate::todo::{
    domain::{OwnerId, PurgeCutoff, RestoreTarget, Todo, TodoId, TodoPatch},
    query::TodoQuery,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for todo repository operations.
pub type TodoRepositoryResult<T> = Result<T, TodoRepositoryError>;

/// Todo persistence contract.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Stores a new todo and returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns [`TodoRepositoryError::DuplicateTodo`] when the identifier is
    /// already taken.
    async fn insert(&self, todo: &Todo) -> TodoRepositoryResult<Todo>;

    /// Finds one of `owner`'s todos by identifier, deleted or not.
    ///
    /// Returns `None` when the todo does not exist or belongs to someone else.
    async fn find_by_id(&self, owner: &OwnerId, id: TodoId) -> TodoRepositoryResult<Option<Todo>>;

    /// Returns one page of todos matching `query`, in query order.
    async fn list(&self, query: &TodoQuery) -> TodoRepositoryResult<Vec<Todo>>;

    /// Counts all todos matching `query`'s owner and filter, ignoring its
    /// sort and page window.
    async fn count(&self, query: &TodoQuery) -> TodoRepositoryResult<u64>;

    /// Applies `patch` to a todo that is not deleted.
    ///
    /// Returns `None` when no owned, non-deleted todo matched.
    async fn apply_patch(
        &self,
        owner: &OwnerId,
        id: TodoId,
        patch: &TodoPatch,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>>;

    /// Completes an active todo, keeping any earlier `completed_at`.
    ///
    /// Returns `None` when no owned, active todo matched.
    async fn complete(
        &self,
        owner: &OwnerId,
        id: TodoId,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>>;

    /// Moves a todo that is not yet deleted to the trash.
    ///
    /// Returns `None` when no owned, non-deleted todo matched.
    async fn soft_delete(
        &self,
        owner: &OwnerId,
        id: TodoId,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>>;

    /// Restores a deleted todo into `target`.
    ///
    /// Returns `None` when no owned, deleted todo matched.
    async fn restore(
        &self,
        owner: &OwnerId,
        id: TodoId,
        target: RestoreTarget,
        now: DateTime<Utc>,
    ) -> TodoRepositoryResult<Option<Todo>>;

    /// Permanently removes one of `owner`'s todos deleted at or before
    /// `cutoff`.
    ///
    /// Returns `false` when no todo satisfied every condition.
    async fn purge(
        &self,
        owner: &OwnerId,
        id: TodoId,
        cutoff: PurgeCutoff,
    ) -> TodoRepositoryResult<bool>;

    /// Permanently removes every todo, across all owners, deleted at or
    /// before `cutoff`, and returns how many were removed.
    async fn purge_expired(&self, cutoff: PurgeCutoff) -> TodoRepositoryResult<u64>;
}

/// Errors returned by todo repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TodoRepositoryError {
    /// A todo with the same identifier already exists.
    #[error("duplicate todo identifier: {0}")]
    DuplicateTodo(TodoId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TodoRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
