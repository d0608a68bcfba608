//! Holiday lookup port.

use super::domain::{Holiday, HolidayPeriod};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for holiday repository operations.
pub type HolidayRepositoryResult<T> = Result<T, HolidayRepositoryError>;

/// Read-only access to the holiday dataset.
#[async_trait]
pub trait HolidayRepository: Send + Sync {
    /// Returns the holidays inside `period`, ordered by date.
    async fn holidays_in(&self, period: HolidayPeriod) -> HolidayRepositoryResult<Vec<Holiday>>;
}

/// Errors returned by holiday repository implementations.
#[derive(Debug, Clone, Error)]
pub enum HolidayRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl HolidayRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
