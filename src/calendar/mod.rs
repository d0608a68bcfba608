//! Read-only holiday lookup.
//!
//! Holidays come from an external calendar dataset. The engine only lists
//! them for a year, optionally narrowed to one month:
//!
//! - Domain types in [`domain`]
//! - Port contract in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Lookup service in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
