//! Todo lifecycle management and retention.
//!
//! This module owns the todo state machine (active, completed, deleted,
//! restored, purged), the filter-and-sort query used by list views, and the
//! trash view that gates permanent purge behind the retention window. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Filter, sort, and pagination sanitisation in [`query`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod query;
pub mod services;

#[cfg(test)]
mod tests;
