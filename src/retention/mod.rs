//! Unattended purge of todos whose retention window has elapsed.
//!
//! [`RetentionSweeper`] performs one bulk purge across every owner and turns
//! the outcome, success or failure, into a [`SweepReport`]. [`SweepSchedule`]
//! drives the sweeper on a background task that first fires at the next local
//! midnight and then repeats at a fixed interval until its
//! [`SweepScheduleHandle`] is shut down.

mod schedule;
mod sweeper;

pub use schedule::{SweepSchedule, SweepScheduleHandle, delay_until_next_midnight};
pub use sweeper::{RetentionSweeper, SweepReport};
