//! In-memory holiday dataset.

use crate::calendar::{
    domain::{Holiday, HolidayPeriod},
    ports::{HolidayRepository, HolidayRepositoryError, HolidayRepositoryResult},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory holiday repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHolidayRepository {
    holidays: Arc<RwLock<Vec<Holiday>>>,
}

impl InMemoryHolidayRepository {
    /// Creates a repository seeded with `holidays`.
    #[must_use]
    pub fn with_holidays(holidays: impl IntoIterator<Item = Holiday>) -> Self {
        Self {
            holidays: Arc::new(RwLock::new(holidays.into_iter().collect())),
        }
    }
}

#[async_trait]
impl HolidayRepository for InMemoryHolidayRepository {
    async fn holidays_in(&self, period: HolidayPeriod) -> HolidayRepositoryResult<Vec<Holiday>> {
        let holidays = self.holidays.read().map_err(|err| {
            HolidayRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut matching: Vec<Holiday> = holidays
            .iter()
            .filter(|holiday| period.contains(holiday.date))
            .cloned()
            .collect();
        matching.sort_by_key(|holiday| holiday.date);
        Ok(matching)
    }
}
