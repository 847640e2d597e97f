//! Canonical calendar-date join key.

use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Timestamp, ValidationError};

/// Calendar date in canonical `YYYY-MM-DD` form.
///
/// Used as the join key across availability overrides, explicit window
/// sets, and sessions. Computed from calendar fields, never from a UTC
/// epoch, so it matches the wall-clock booking mental model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Creates a DateKey from a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Creates a DateKey from year/month/day fields.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "date",
                    format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day),
                )
            })
    }

    /// Returns the inner calendar date.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    /// Weekday index with Sunday = 0 through Saturday = 6.
    pub fn weekday_index(&self) -> u8 {
        self.0.weekday().num_days_from_sunday() as u8
    }

    /// Returns the instant at the given minute offset from this date's
    /// midnight.
    pub fn instant_at(&self, minute: u16) -> Timestamp {
        let midnight = Utc.from_utc_datetime(&self.0.and_hms_opt(0, 0, 0).expect("valid midnight"));
        Timestamp::from_datetime(midnight + chrono::Duration::minutes(minute as i64))
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for DateKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| {
                ValidationError::invalid_format("date", format!("'{}' is not YYYY-MM-DD", s))
            })
    }
}
