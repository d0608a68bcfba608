//! Domain model for todo lifecycle management.
//!
//! The todo domain models validated field values, the status state machine,
//! and the retention window that governs permanent purge, while keeping all
//! infrastructure concerns outside of the domain boundary.

mod error;
mod fields;
mod ids;
mod retention;
mod todo;

pub use error::{ParseTodoPriorityError, ParseTodoStatusError, TodoDomainError};
pub use fields::{DueDate, TodoTitle};
pub use ids::{OwnerId, TodoId};
pub use retention::{PurgeCutoff, RETENTION_DAYS};
pub use todo::{
    NewTodo, PersistedTodoData, RestoreTarget, Todo, TodoPatch, TodoPriority, TodoStatus,
};
