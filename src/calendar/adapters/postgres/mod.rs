//! `PostgreSQL` adapter for holiday lookup.

mod repository;
mod schema;

pub use repository::{CalendarPgPool, PostgresHolidayRepository};
