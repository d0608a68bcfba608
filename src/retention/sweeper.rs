//! Single bulk purge run.

use crate::todo::{domain::PurgeCutoff, ports::TodoRepository};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::{sync::Arc, time::Duration};

use super::delay_until_next_midnight;

/// Outcome of one sweep run.
///
/// A failed run is still a report: the failure is recorded, not raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SweepReport {
    /// Whether the purge completed.
    pub success: bool,
    /// Number of todos permanently removed; zero on failure.
    pub deleted_count: u64,
    /// When the run started.
    pub ran_at: DateTime<Utc>,
    /// Summary of a successful run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Reason a run failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SweepReport {
    fn succeeded(deleted_count: u64, ran_at: DateTime<Utc>) -> Self {
        Self {
            success: true,
            deleted_count,
            ran_at,
            message: Some(format!("purged {deleted_count} expired todos")),
            error: None,
        }
    }

    fn failed(error: String, ran_at: DateTime<Utc>) -> Self {
        Self {
            success: false,
            deleted_count: 0,
            ran_at,
            message: None,
            error: Some(error),
        }
    }
}

/// Purges every todo, across all owners, that has been in the trash for at
/// least the retention window.
pub struct RetentionSweeper<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for RetentionSweeper<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> RetentionSweeper<R, C>
where
    R: TodoRepository,
    C: Clock + Send + Sync,
{
    /// Creates a sweeper over the shared repository.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Runs one purge pass.
    ///
    /// Store failures are logged and reported with `success == false`; this
    /// method never fails, so a broken run cannot stop later runs.
    pub async fn run_once(&self) -> SweepReport {
        let ran_at = self.clock.utc();
        let cutoff = PurgeCutoff::at(ran_at);
        match self.repository.purge_expired(cutoff).await {
            Ok(deleted_count) => {
                tracing::info!(
                    deleted_count,
                    cutoff = %cutoff.instant(),
                    "retention sweep completed"
                );
                SweepReport::succeeded(deleted_count, ran_at)
            }
            Err(err) => {
                tracing::error!(error = %err, cutoff = %cutoff.instant(), "retention sweep failed");
                SweepReport::failed(err.to_string(), ran_at)
            }
        }
    }

    /// Returns the wait between now and the next local midnight.
    #[must_use]
    pub fn delay_until_first_run(&self) -> Duration {
        delay_until_next_midnight(&self.clock.local())
    }
}
