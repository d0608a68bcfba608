//! Todo aggregate root and its status state machine.

use super::{
    OwnerId, ParseTodoPriorityError, ParseTodoStatusError, PurgeCutoff, RETENTION_DAYS,
    TodoDomainError, TodoId, TodoTitle,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Todo lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    /// Open work.
    Active,
    /// Finished work.
    Completed,
    /// Soft-deleted and sitting in the trash.
    Deleted,
}

impl TodoStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Completed => "COMPLETED",
            Self::Deleted => "DELETED",
        }
    }
}

impl TryFrom<&str> for TodoStatus {
    type Error = ParseTodoStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "ACTIVE" => Ok(Self::Active),
            "COMPLETED" => Ok(Self::Completed),
            "DELETED" => Ok(Self::Deleted),
            _ => Err(ParseTodoStatusError(value.to_owned())),
        }
    }
}

impl FromStr for TodoStatus {
    type Err = ParseTodoStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Todo priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoPriority {
    /// Can wait.
    Low,
    /// Default priority.
    #[default]
    Normal,
    /// Needs attention first.
    High,
}

impl TodoPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
        }
    }

    /// Returns the sort rank, lowest priority first.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Normal => 1,
            Self::High => 2,
        }
    }
}

impl TryFrom<&str> for TodoPriority {
    type Error = ParseTodoPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "LOW" => Ok(Self::Low),
            "NORMAL" => Ok(Self::Normal),
            "HIGH" => Ok(Self::High),
            _ => Err(ParseTodoPriorityError(value.to_owned())),
        }
    }
}

impl FromStr for TodoPriority {
    type Err = ParseTodoPriorityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::try_from(value)
    }
}

impl fmt::Display for TodoPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated fields for a todo about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    /// Validated title.
    pub title: TodoTitle,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Optional free-text memo.
    pub memo: Option<String>,
    /// Priority.
    pub priority: TodoPriority,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
}

/// Todo aggregate root.
///
/// Serialises for output only. Records are rebuilt through [`Todo::new`] or
/// [`Todo::from_persisted`], never deserialised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    id: TodoId,
    owner_id: OwnerId,
    title: TodoTitle,
    description: Option<String>,
    memo: Option<String>,
    priority: TodoPriority,
    status: TodoStatus,
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    deleted_at: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted todo aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTodoData {
    /// Persisted todo identifier.
    pub id: TodoId,
    /// Persisted owner identifier.
    pub owner_id: OwnerId,
    /// Persisted title.
    pub title: TodoTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted memo.
    pub memo: Option<String>,
    /// Persisted priority.
    pub priority: TodoPriority,
    /// Persisted status.
    pub status: TodoStatus,
    /// Persisted due date.
    pub due_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest modification timestamp.
    pub updated_at: DateTime<Utc>,
    /// Persisted first-completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Persisted soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Todo {
    /// Creates a new active todo owned by `owner_id`.
    #[must_use]
    pub fn new(owner_id: OwnerId, fields: NewTodo, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TodoId::new(),
            owner_id,
            title: fields.title,
            description: fields.description,
            memo: fields.memo,
            priority: fields.priority,
            status: TodoStatus::Active,
            due_date: fields.due_date,
            created_at: timestamp,
            updated_at: timestamp,
            completed_at: None,
            deleted_at: None,
        }
    }

    /// Reconstructs a todo from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTodoData) -> Self {
        debug_assert_eq!(
            data.deleted_at.is_some(),
            data.status == TodoStatus::Deleted,
            "deleted_at must be set exactly when the todo is deleted"
        );
        Self {
            id: data.id,
            owner_id: data.owner_id,
            title: data.title,
            description: data.description,
            memo: data.memo,
            priority: data.priority,
            status: data.status,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
            completed_at: data.completed_at,
            deleted_at: data.deleted_at,
        }
    }

    /// Returns the todo identifier.
    #[must_use]
    pub const fn id(&self) -> TodoId {
        self.id
    }

    /// Returns the owner identifier.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TodoTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the memo, if any.
    #[must_use]
    pub fn memo(&self) -> Option<&str> {
        self.memo.as_deref()
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TodoPriority {
        self.priority
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TodoStatus {
        self.status
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns when the todo was first completed, if ever.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns when the todo was soft-deleted, if it is in the trash.
    #[must_use]
    pub const fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    /// Returns `true` when the todo is in the trash.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Marks an active todo as completed.
    ///
    /// `completed_at` keeps its first value across re-completions. Returns
    /// `false`, leaving the todo untouched, unless the todo is active.
    pub fn try_complete(&mut self, now: DateTime<Utc>) -> bool {
        if self.status != TodoStatus::Active || self.is_deleted() {
            return false;
        }
        self.status = TodoStatus::Completed;
        self.completed_at.get_or_insert(now);
        self.updated_at = now;
        true
    }

    /// Moves the todo to the trash.
    ///
    /// Returns `false`, leaving the todo untouched, when it is already deleted.
    pub fn try_soft_delete(&mut self, now: DateTime<Utc>) -> bool {
        if self.is_deleted() {
            return false;
        }
        self.status = TodoStatus::Deleted;
        self.deleted_at = Some(now);
        self.updated_at = now;
        true
    }

    /// Takes the todo out of the trash into `target`.
    ///
    /// Restoring as completed keeps an existing `completed_at` and sets it
    /// only if the todo was never completed. Returns `false`, leaving the todo
    /// untouched, when it is not deleted.
    pub fn try_restore(&mut self, target: RestoreTarget, now: DateTime<Utc>) -> bool {
        if !self.is_deleted() {
            return false;
        }
        self.status = target.status();
        self.deleted_at = None;
        if target == RestoreTarget::Completed {
            self.completed_at.get_or_insert(now);
        }
        self.updated_at = now;
        true
    }

    /// Applies an edit to the mutable fields of a todo that is not deleted.
    ///
    /// Returns `false`, leaving the todo untouched, when it is deleted.
    pub fn try_apply_patch(&mut self, patch: &TodoPatch, now: DateTime<Utc>) -> bool {
        if self.is_deleted() {
            return false;
        }
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(memo) = &patch.memo {
            self.memo.clone_from(memo);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        self.updated_at = now;
        true
    }

    /// Returns the earliest instant the todo may be purged, if it is deleted.
    #[must_use]
    pub fn purgeable_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
            .map(|deleted| deleted + Duration::days(RETENTION_DAYS))
    }

    /// Returns `true` when the todo is deleted and old enough to purge.
    #[must_use]
    pub fn is_purgeable(&self, cutoff: PurgeCutoff) -> bool {
        cutoff.admits(self.deleted_at)
    }
}

/// Status a soft-deleted todo may be restored into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RestoreTarget {
    /// Back to open work.
    #[default]
    Active,
    /// Straight back to finished work.
    Completed,
}

impl RestoreTarget {
    /// Returns the status the restored todo will have.
    #[must_use]
    pub const fn status(self) -> TodoStatus {
        match self {
            Self::Active => TodoStatus::Active,
            Self::Completed => TodoStatus::Completed,
        }
    }
}

impl TryFrom<TodoStatus> for RestoreTarget {
    type Error = TodoDomainError;

    fn try_from(status: TodoStatus) -> Result<Self, Self::Error> {
        match status {
            TodoStatus::Active => Ok(Self::Active),
            TodoStatus::Completed => Ok(Self::Completed),
            TodoStatus::Deleted => Err(TodoDomainError::InvalidRestoreTarget(status)),
        }
    }
}

/// Partial edit of a todo's mutable fields.
///
/// Outer `None` leaves a field unchanged; `Some(None)` clears an optional
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// Replacement title.
    pub title: Option<TodoTitle>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement or cleared memo.
    pub memo: Option<Option<String>>,
    /// Replacement priority.
    pub priority: Option<TodoPriority>,
    /// Replacement or cleared due date.
    pub due_date: Option<Option<NaiveDate>>,
}

impl TodoPatch {
    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.memo.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}
