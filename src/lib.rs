//! Todo keeper: lifecycle and retention engine for personal todo lists.
//!
//! The crate owns the rules a todo lives by: creation and editing with
//! validation, completion, soft deletion into a trash, restoration, and
//! permanent purge once the 30-day retention window has elapsed. Transport,
//! authentication and UI are left to callers, which pass an already
//! authenticated owner identifier into every operation.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` implementations of ports
//! - **Services**: Owner-scoped orchestration over a port
//!
//! # Modules
//!
//! - [`todo`]: Todo state machine, list queries, and the trash view
//! - [`retention`]: Scheduled bulk purge of expired trash
//! - [`calendar`]: Read-only holiday lookup
//! - [`config`]: Environment configuration for the sweeper process

pub mod calendar;
pub mod config;
pub mod retention;
pub mod todo;
