//! Retention window for soft-deleted todos.

use chrono::{DateTime, Duration, Utc};

/// Minimum number of days a soft-deleted todo stays recoverable.
pub const RETENTION_DAYS: i64 = 30;

/// Latest deletion instant that is old enough for permanent purge.
///
/// A cutoff can only be derived from a current instant minus the full
/// retention window, so no purge path can be handed a shorter window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurgeCutoff(DateTime<Utc>);

impl PurgeCutoff {
    /// Returns the cutoff for the given current instant.
    #[must_use]
    pub fn at(now: DateTime<Utc>) -> Self {
        Self(now - Duration::days(RETENTION_DAYS))
    }

    /// Returns the cutoff instant.
    #[must_use]
    pub const fn instant(self) -> DateTime<Utc> {
        self.0
    }

    /// Returns `true` when a todo deleted at `deleted_at` may be purged.
    #[must_use]
    pub fn admits(self, deleted_at: Option<DateTime<Utc>>) -> bool {
        deleted_at.is_some_and(|deleted| deleted <= self.0)
    }
}
