//! Validated field values for todo creation and editing.

use super::TodoDomainError;
use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Todo title: trimmed, non-empty, and at most [`TodoTitle::MAX_CHARS`]
/// characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TodoTitle(String);

impl TodoTitle {
    /// Maximum number of characters in a trimmed title.
    pub const MAX_CHARS: usize = 100;

    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::EmptyTitle`] when the value is blank and
    /// [`TodoDomainError::TitleTooLong`] when the trimmed value exceeds
    /// [`Self::MAX_CHARS`] characters.
    pub fn new(value: impl AsRef<str>) -> Result<Self, TodoDomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TodoDomainError::EmptyTitle);
        }
        let actual = trimmed.chars().count();
        if actual > Self::MAX_CHARS {
            return Err(TodoDomainError::TitleTooLong {
                max: Self::MAX_CHARS,
                actual,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for TodoTitle {
    type Error = TodoDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TodoTitle> for String {
    fn from(value: TodoTitle) -> Self {
        value.0
    }
}

impl AsRef<str> for TodoTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TodoTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Due date parsing and validation.
///
/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp. A timestamp is converted to
/// the caller's zone before its calendar date is taken.
pub struct DueDate;

impl DueDate {
    /// Parses raw due-date input, reading timestamps in `zone`.
    ///
    /// Blank input means "no due date" and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidDueDate`] when the value is not a
    /// recognised date format.
    pub fn parse<Tz: TimeZone>(
        raw: &str,
        zone: &Tz,
    ) -> Result<Option<NaiveDate>, TodoDomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(Some(date));
        }
        DateTime::parse_from_rfc3339(trimmed)
            .map(|timestamp| Some(timestamp.with_timezone(zone).date_naive()))
            .map_err(|_| TodoDomainError::InvalidDueDate(raw.to_owned()))
    }

    /// Parses raw due-date input in `now`'s zone and rejects dates strictly
    /// before `now`'s calendar date.
    ///
    /// # Errors
    ///
    /// Returns [`TodoDomainError::InvalidDueDate`] for unparseable input and
    /// [`TodoDomainError::DueDateInPast`] for dates before today.
    pub fn parse_not_before<Tz: TimeZone>(
        raw: &str,
        now: &DateTime<Tz>,
    ) -> Result<Option<NaiveDate>, TodoDomainError> {
        let today = now.date_naive();
        let parsed = Self::parse(raw, &now.timezone())?;
        match parsed {
            Some(due) if due < today => Err(TodoDomainError::DueDateInPast { due, today }),
            other => Ok(other),
        }
    }
}
