//! Diesel row models for todo persistence.

use super::schema::todos;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Query result row for todo records.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = todos)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TodoRow {
    /// Todo identifier.
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: uuid::Uuid,
    /// Owning user identifier.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub owner_id: String,
    /// Trimmed title.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub title: String,
    /// Optional description.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub description: Option<String>,
    /// Optional memo.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Text>)]
    pub memo: Option<String>,
    /// Priority.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub priority: String,
    /// Lifecycle status.
    #[diesel(sql_type = diesel::sql_types::Varchar)]
    pub status: String,
    /// Optional due date.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Date>)]
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[diesel(sql_type = diesel::sql_types::Timestamptz)]
    pub updated_at: DateTime<Utc>,
    /// First completion timestamp.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Soft-deletion timestamp.
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Timestamptz>)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert model for todo records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = todos)]
pub struct NewTodoRow {
    /// Todo identifier.
    pub id: uuid::Uuid,
    /// Owning user identifier.
    pub owner_id: String,
    /// Trimmed title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional memo.
    pub memo: Option<String>,
    /// Priority.
    pub priority: String,
    /// Lifecycle status.
    pub status: String,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
    /// First completion timestamp.
    pub completed_at: Option<DateTime<Utc>>,
    /// Soft-deletion timestamp.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Partial update of a todo's editable columns.
///
/// `None` leaves a column untouched; `Some(None)` writes `NULL`.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = todos)]
pub struct TodoChangeset {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement or cleared memo.
    pub memo: Option<Option<String>>,
    /// Replacement priority.
    pub priority: Option<String>,
    /// Replacement or cleared due date.
    pub due_date: Option<Option<NaiveDate>>,
    /// Modification timestamp.
    pub updated_at: DateTime<Utc>,
}
