//! Midnight-anchored repeating sweep.

use super::{RetentionSweeper, SweepReport};
use crate::todo::ports::TodoRepository;
use chrono::{DateTime, NaiveTime, TimeZone};
use mockable::Clock;
use std::time::Duration;
use tokio::{
    sync::watch,
    task::{JoinError, JoinHandle},
    time::{self, Instant, MissedTickBehavior},
};

const ONE_DAY: Duration = Duration::from_secs(24 * 60 * 60);
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Returns the time from `now` until the following midnight in `now`'s zone.
///
/// When that midnight does not exist locally (a daylight-saving gap), the
/// wall-clock difference is used instead.
#[must_use]
pub fn delay_until_next_midnight<Tz: TimeZone>(now: &DateTime<Tz>) -> Duration {
    let local = now.naive_local();
    let Some(tomorrow) = local.date().succ_opt() else {
        return ONE_DAY;
    };
    let next_midnight = tomorrow.and_time(NaiveTime::MIN);
    let delta = now
        .timezone()
        .from_local_datetime(&next_midnight)
        .earliest()
        .map_or(next_midnight - local, |midnight| {
            midnight.signed_duration_since(now)
        });
    delta.to_std().unwrap_or(Duration::ZERO)
}

/// Repeating sweep timetable: first run at the next local midnight, then
/// every `interval`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepSchedule {
    interval: Duration,
}

impl Default for SweepSchedule {
    fn default() -> Self {
        Self::every(ONE_DAY)
    }
}

impl SweepSchedule {
    /// Creates a schedule repeating every `interval`, raised to at least one
    /// second.
    #[must_use]
    pub fn every(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_INTERVAL),
        }
    }

    /// Creates a schedule repeating every `hours` hours.
    #[must_use]
    pub fn every_hours(hours: u64) -> Self {
        Self::every(Duration::from_secs(hours.saturating_mul(60 * 60)))
    }

    /// Returns the repeat interval.
    #[must_use]
    pub const fn interval(self) -> Duration {
        self.interval
    }

    /// Spawns the schedule onto the current Tokio runtime.
    ///
    /// The first run waits for [`RetentionSweeper::delay_until_first_run`].
    /// A run that overruns the interval delays the next one rather than
    /// bunching runs together.
    #[must_use]
    pub fn spawn<R, C>(self, sweeper: RetentionSweeper<R, C>) -> SweepScheduleHandle
    where
        R: TodoRepository + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let first_delay = sweeper.delay_until_first_run();
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let (report_tx, report_rx) = watch::channel(None);
        let interval = self.interval;

        tracing::info!(
            first_run_in_secs = first_delay.as_secs(),
            interval_secs = interval.as_secs(),
            "retention sweep scheduled"
        );

        let task = tokio::spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + first_delay, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        let report = sweeper.run_once().await;
                        report_tx.send_replace(Some(report));
                    }
                    _ = shutdown_rx.changed() => break,
                }
            }
            tracing::debug!("retention sweep schedule stopped");
        });

        SweepScheduleHandle {
            shutdown: shutdown_tx,
            reports: report_rx,
            task,
        }
    }
}

/// Handle to a running sweep schedule.
///
/// Dropping the handle also stops the schedule.
pub struct SweepScheduleHandle {
    shutdown: watch::Sender<bool>,
    reports: watch::Receiver<Option<SweepReport>>,
    task: JoinHandle<()>,
}

impl SweepScheduleHandle {
    /// Returns the report of the most recent run, if any run has finished.
    #[must_use]
    pub fn last_report(&self) -> Option<SweepReport> {
        self.reports.borrow().clone()
    }

    /// Returns a receiver that observes every new report.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<SweepReport>> {
        self.reports.clone()
    }

    /// Cancels the pending timer and waits for the background task to stop.
    ///
    /// A run already in progress completes first.
    ///
    /// # Errors
    ///
    /// Returns the [`JoinError`] when the background task panicked.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        self.shutdown.send_replace(true);
        self.task.await
    }
}
