//! Filter, sort, and pagination for todo list views.
//!
//! Raw list options arrive from untrusted query strings. [`ListTodosOptions`]
//! deserialises them leniently (unrecognised values become "absent") and
//! [`TodoQuery::from_options`] clamps and defaults them into a typed query that
//! is always scoped to a single owner. Malformed input is never an error here.

pub(crate) mod lenient;
mod options;
mod builder;

pub use options::ListTodosOptions;
pub use builder::{
    DEFAULT_PAGE_SIZE, DeletionScope, MAX_PAGE_SIZE, Pagination, SortDirection, SortField,
    TodoFilter, TodoQuery, TodoSort,
};
