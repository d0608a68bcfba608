//! Port contracts for todo lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by todo services and
//! the retention sweeper.

pub mod repository;

pub use repository::{TodoRepository, TodoRepositoryError, TodoRepositoryResult};
