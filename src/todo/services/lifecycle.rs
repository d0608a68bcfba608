//! Service layer for the todo state machine.

use super::{TodoServiceError, TodoServiceResult};
use crate::todo::{
    domain::{
        DueDate, NewTodo, OwnerId, PurgeCutoff, RestoreTarget, Todo, TodoId, TodoPatch,
        TodoPriority, TodoStatus, TodoTitle,
    },
    ports::TodoRepository,
    query::{ListTodosOptions, TodoQuery},
};
use chrono::{DateTime, Local};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a todo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTodoRequest {
    title: String,
    description: Option<String>,
    memo: Option<String>,
    priority: Option<TodoPriority>,
    due_date: Option<String>,
}

impl CreateTodoRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            memo: None,
            priority: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the memo.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Sets the priority; defaults to [`TodoPriority::Normal`].
    #[must_use]
    pub const fn with_priority(mut self, priority: TodoPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets the raw due date (`YYYY-MM-DD` or RFC 3339).
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(due_date.into());
        self
    }
}

/// Request payload for a partial todo edit.
///
/// Fields that are never set stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateTodoRequest {
    title: Option<String>,
    description: Option<Option<String>>,
    memo: Option<Option<String>>,
    priority: Option<TodoPriority>,
    due_date: Option<Option<String>>,
}

impl UpdateTodoRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn clear_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the memo.
    #[must_use]
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(Some(memo.into()));
        self
    }

    /// Clears the memo.
    #[must_use]
    pub fn clear_memo(mut self) -> Self {
        self.memo = Some(None);
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TodoPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the due date with raw input (`YYYY-MM-DD` or RFC 3339).
    #[must_use]
    pub fn with_due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = Some(Some(due_date.into()));
        self
    }

    /// Clears the due date.
    #[must_use]
    pub fn clear_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    fn into_patch(self, now: &DateTime<Local>) -> TodoServiceResult<TodoPatch> {
        let title = self.title.map(TodoTitle::new).transpose()?;
        let due_date = match self.due_date {
            None => None,
            Some(None) => Some(None),
            Some(Some(raw)) => Some(DueDate::parse_not_before(&raw, now)?),
        };
        Ok(TodoPatch {
            title,
            description: self.description,
            memo: self.memo,
            priority: self.priority,
            due_date,
        })
    }
}

/// Todo lifecycle orchestration service.
///
/// Every operation is scoped to the calling owner. A todo owned by someone
/// else is indistinguishable from one that does not exist.
#[derive(Clone)]
pub struct TodoLifecycleService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TodoLifecycleService<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new todo lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    fn local_now(&self) -> DateTime<Local> {
        self.clock.local()
    }

    /// Creates an active todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] for a blank or over-long
    /// title or an unparseable or past due date, and
    /// [`TodoServiceError::StoreUnavailable`] when persistence fails.
    pub async fn create(&self, owner: &OwnerId, request: CreateTodoRequest) -> TodoServiceResult<Todo> {
        let title = TodoTitle::new(&request.title)?;
        let due_date = request
            .due_date
            .as_deref()
            .map(|raw| DueDate::parse_not_before(raw, &self.local_now()))
            .transpose()?
            .flatten();
        let fields = NewTodo {
            title,
            description: request.description,
            memo: request.memo,
            priority: request.priority.unwrap_or_default(),
            due_date,
        };

        let todo = Todo::new(owner.clone(), fields, &*self.clock);
        let stored = self.repository.insert(&todo).await?;
        tracing::debug!(owner = %owner, todo_id = %stored.id(), "created todo");
        Ok(stored)
    }

    /// Fetches one of the owner's todos, including deleted ones.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotFound`] when no owned todo matches.
    pub async fn get(&self, owner: &OwnerId, id: TodoId) -> TodoServiceResult<Todo> {
        self.repository
            .find_by_id(owner, id)
            .await?
            .ok_or(TodoServiceError::NotFound(id))
    }

    /// Lists the owner's todos using leniently sanitised options.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::StoreUnavailable`] when persistence fails.
    pub async fn list(
        &self,
        owner: &OwnerId,
        options: &ListTodosOptions,
    ) -> TodoServiceResult<Vec<Todo>> {
        let query = TodoQuery::from_options(owner.clone(), options);
        Ok(self.repository.list(&query).await?)
    }

    /// Applies a partial edit.
    ///
    /// Supplied fields are validated before the todo is looked up. An empty
    /// edit returns the todo unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] for invalid fields,
    /// [`TodoServiceError::NotFound`] when no owned todo matches,
    /// [`TodoServiceError::EditDeleted`] for a todo in the trash, and
    /// [`TodoServiceError::UpdateFailed`] when the write matched no row.
    pub async fn update(
        &self,
        owner: &OwnerId,
        id: TodoId,
        request: UpdateTodoRequest,
    ) -> TodoServiceResult<Todo> {
        let patch = request.into_patch(&self.local_now())?;
        let existing = self.get(owner, id).await?;
        if existing.is_deleted() {
            tracing::warn!(owner = %owner, todo_id = %id, "rejected edit of deleted todo");
            return Err(TodoServiceError::EditDeleted(id));
        }
        if patch.is_empty() {
            return Ok(existing);
        }

        let updated = self
            .repository
            .apply_patch(owner, id, &patch, self.clock.utc())
            .await?
            .ok_or(TodoServiceError::UpdateFailed(id))?;
        tracing::debug!(owner = %owner, todo_id = %id, "updated todo");
        Ok(updated)
    }

    /// Marks an active todo as completed.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Conflict`] when no owned, active todo
    /// matched: the todo is already completed, is deleted, or does not exist
    /// for this owner.
    pub async fn complete(&self, owner: &OwnerId, id: TodoId) -> TodoServiceResult<Todo> {
        let Some(completed) = self.repository.complete(owner, id, self.clock.utc()).await? else {
            tracing::warn!(owner = %owner, todo_id = %id, "completion rejected");
            return Err(TodoServiceError::Conflict(id));
        };
        tracing::debug!(owner = %owner, todo_id = %id, "completed todo");
        Ok(completed)
    }

    /// Moves a todo to the trash.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotFound`] when no owned, non-deleted todo
    /// matched, including when the todo is already in the trash.
    pub async fn delete(&self, owner: &OwnerId, id: TodoId) -> TodoServiceResult<Todo> {
        let deleted = self
            .repository
            .soft_delete(owner, id, self.clock.utc())
            .await?
            .ok_or(TodoServiceError::NotFound(id))?;
        tracing::debug!(owner = %owner, todo_id = %id, "moved todo to trash");
        Ok(deleted)
    }

    /// Restores a todo from the trash as `target` (default active).
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::Validation`] when `target` is
    /// [`TodoStatus::Deleted`] and [`TodoServiceError::NotFound`] when no
    /// owned, deleted todo matched.
    pub async fn restore(
        &self,
        owner: &OwnerId,
        id: TodoId,
        target: Option<TodoStatus>,
    ) -> TodoServiceResult<Todo> {
        let restore_target = target
            .map(RestoreTarget::try_from)
            .transpose()?
            .unwrap_or_default();
        let restored = self
            .repository
            .restore(owner, id, restore_target, self.clock.utc())
            .await?
            .ok_or(TodoServiceError::NotFound(id))?;
        tracing::debug!(
            owner = %owner,
            todo_id = %id,
            status = %restored.status(),
            "restored todo"
        );
        Ok(restored)
    }

    /// Permanently removes a todo that has been in the trash for the full
    /// retention window.
    ///
    /// # Errors
    ///
    /// Returns [`TodoServiceError::NotAllowed`] when the todo does not exist
    /// for this owner, is not deleted, or was deleted too recently.
    pub async fn purge(&self, owner: &OwnerId, id: TodoId) -> TodoServiceResult<()> {
        let cutoff = PurgeCutoff::at(self.clock.utc());
        if !self.repository.purge(owner, id, cutoff).await? {
            tracing::warn!(owner = %owner, todo_id = %id, "purge refused");
            return Err(TodoServiceError::NotAllowed(id));
        }
        tracing::info!(owner = %owner, todo_id = %id, "purged todo");
        Ok(())
    }
}
