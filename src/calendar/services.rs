//! Holiday lookup service.

use super::{
    domain::{CalendarDomainError, Holiday, HolidayPeriod},
    ports::{HolidayRepository, HolidayRepositoryError},
};
use crate::todo::services::ErrorKind;
use chrono::Datelike;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by [`HolidayService`].
#[derive(Debug, Clone, Error)]
pub enum CalendarError {
    /// The requested period was invalid.
    #[error(transparent)]
    Validation(#[from] CalendarDomainError),

    /// The holiday dataset could not be read.
    #[error(transparent)]
    Repository(#[from] HolidayRepositoryError),
}

impl CalendarError {
    /// Returns the category used to pick a transport status.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Repository(_) => ErrorKind::StoreUnavailable,
        }
    }
}

/// Lists holidays by year and optional month.
#[derive(Clone)]
pub struct HolidayService<R, C>
where
    R: HolidayRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> HolidayService<R, C>
where
    R: HolidayRepository,
    C: Clock + Send + Sync,
{
    /// Creates a holiday service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns holidays for `year` (default: the current local year),
    /// narrowed to `month` when given, ordered by date.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::Validation`] when `month` is outside `1..=12`
    /// and [`CalendarError::Repository`] when the dataset is unavailable.
    pub async fn holidays(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Vec<Holiday>, CalendarError> {
        let year_number = year.unwrap_or_else(|| self.clock.local().year());
        let period = match month {
            Some(month_number) => HolidayPeriod::month(year_number, month_number)?,
            None => HolidayPeriod::year(year_number),
        };
        Ok(self.repository.holidays_in(period).await?)
    }
}
