//! Holiday records and lookup periods.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A named holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Calendar date of the holiday.
    pub date: NaiveDate,
    /// Holiday name.
    pub name: String,
    /// Optional longer description.
    pub description: Option<String>,
}

impl Holiday {
    /// Creates a holiday without a description.
    #[must_use]
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            description: None,
        }
    }

    /// Attaches a description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Validation errors for holiday lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalendarDomainError {
    /// The month was outside `1..=12`.
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
}

/// A year, optionally narrowed to one validated month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HolidayPeriod {
    year: i32,
    month: Option<u32>,
}

impl HolidayPeriod {
    /// Covers the whole of `year`.
    #[must_use]
    pub const fn year(year: i32) -> Self {
        Self { year, month: None }
    }

    /// Covers one month of `year`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarDomainError::InvalidMonth`] unless `month` is in
    /// `1..=12`.
    pub const fn month(year: i32, month: u32) -> Result<Self, CalendarDomainError> {
        if month < 1 || month > 12 {
            return Err(CalendarDomainError::InvalidMonth(month));
        }
        Ok(Self {
            year,
            month: Some(month),
        })
    }

    /// Returns the covered year.
    #[must_use]
    pub const fn year_number(self) -> i32 {
        self.year
    }

    /// Returns the covered month, when narrowed.
    #[must_use]
    pub const fn month_number(self) -> Option<u32> {
        self.month
    }

    /// Returns `true` when `date` falls inside the period.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && self.month.is_none_or(|month| date.month() == month)
    }
}
