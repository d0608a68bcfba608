//! Unit tests for the todo context.


use crate::todo::domain::{
    OwnerId, PersistedTodoData, Todo, TodoId, TodoPriority, TodoStatus, TodoTitle,
};
use chrono::{DateTime, NaiveDate, Utc};

pub(super) fn owner(value: &str) -> OwnerId {
    OwnerId::new(value).expect("valid owner id")
}

/// Persisted fields for an active todo created and updated at `created_at`.
pub(super) fn persisted(owner_id: &str, title: &str, created_at: DateTime<Utc>) -> PersistedTodoData {
    PersistedTodoData {
        id: TodoId::new(),
        owner_id: owner(owner_id),
        title: TodoTitle::new(title).expect("valid title"),
        description: None,
        memo: None,
        priority: TodoPriority::Normal,
        status: TodoStatus::Active,
        due_date: None,
        created_at,
        updated_at: created_at,
        completed_at: None,
        deleted_at: None,
    }
}

pub(super) fn with_due(mut data: PersistedTodoData, due: Option<NaiveDate>) -> Todo {
    data.due_date = due;
    Todo::from_persisted(data)
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
