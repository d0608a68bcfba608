//! Process configuration loaded from environment variables.
//!
//! Unlike request parameters, which are sanitised leniently, a bad
//! configuration value is an error and stops startup.

use crate::retention::SweepSchedule;
use std::env;
use thiserror::Error;

/// Environment variable holding the `PostgreSQL` connection URL.
pub const DATABASE_URL: &str = "DATABASE_URL";
/// Environment variable holding the connection pool size.
pub const DATABASE_POOL_SIZE: &str = "DATABASE_POOL_SIZE";
/// Environment variable holding the sweep interval in hours.
pub const SWEEP_INTERVAL_HOURS: &str = "SWEEP_INTERVAL_HOURS";

const DEFAULT_POOL_SIZE: u32 = 10;
const DEFAULT_SWEEP_INTERVAL_HOURS: u64 = 24;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required variable was unset or blank.
    #[error("{0} must be set")]
    Missing(&'static str),

    /// A variable held a value that could not be used.
    #[error("{key} has invalid value {value:?}: {reason}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value.
        value: String,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Runtime configuration for the retention engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// `PostgreSQL` connection URL.
    pub database_url: String,
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// Hours between sweeps after the first midnight run.
    pub sweep_interval_hours: u64,
}

impl EngineConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: required
    /// - `DATABASE_POOL_SIZE`: positive integer, default 10
    /// - `SWEEP_INTERVAL_HOURS`: positive integer, default 24
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `DATABASE_URL` is missing or a numeric
    /// variable is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// # Errors
    ///
    /// See [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let database_url = read(DATABASE_URL).ok_or(ConfigError::Missing(DATABASE_URL))?;
        let pool_size = read(DATABASE_POOL_SIZE)
            .map(|raw| positive(DATABASE_POOL_SIZE, &raw))
            .transpose()?
            .unwrap_or(DEFAULT_POOL_SIZE);
        let sweep_interval_hours = read(SWEEP_INTERVAL_HOURS)
            .map(|raw| positive(SWEEP_INTERVAL_HOURS, &raw))
            .transpose()?
            .unwrap_or(DEFAULT_SWEEP_INTERVAL_HOURS);

        Ok(Self {
            database_url,
            pool_size,
            sweep_interval_hours,
        })
    }

    /// Returns the sweep schedule described by this configuration.
    #[must_use]
    pub fn sweep_schedule(&self) -> SweepSchedule {
        SweepSchedule::every_hours(self.sweep_interval_hours)
    }
}

fn positive<T>(key: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + Default,
{
    let invalid = |reason| ConfigError::Invalid {
        key,
        value: raw.to_owned(),
        reason,
    };
    let value: T = raw.parse().map_err(|_| invalid("not an integer"))?;
    if value <= T::default() {
        return Err(invalid("must be at least 1"));
    }
    Ok(value)
}
