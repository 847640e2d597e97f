//! Minute-of-day arithmetic and clock-string conversion.
//!
//! All scheduling runs on integer minute offsets from midnight; clock
//! strings appear only at the parsing/formatting boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Booking slot duration in minutes.
pub const SLOT_MIN: u16 = 30;

/// Number of minutes in a day; the exclusive upper bound for slot ends.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Minute offset from midnight, 0..=1440.
///
/// 1440 is allowed so a window may end exactly at midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinuteOfDay(u16);

impl MinuteOfDay {
    /// Creates a MinuteOfDay, returning error if past end of day.
    pub fn new(minutes: u16) -> Result<Self, ValidationError> {
        if minutes > MINUTES_PER_DAY {
            return Err(ValidationError::out_of_range(
                "minute_of_day",
                0,
                MINUTES_PER_DAY as i32,
                minutes as i32,
            ));
        }
        Ok(Self(minutes))
    }

    /// Parses a 24-hour `HH:MM` clock string.
    pub fn parse(clock: &str) -> Result<Self, ValidationError> {
        let invalid = || {
            ValidationError::invalid_format("time", format!("'{}' is not a valid HH:MM time", clock))
        };
        let (h, m) = clock.split_once(':').ok_or_else(invalid)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(invalid());
        }
        let hours: u16 = h.parse().map_err(|_| invalid())?;
        let minutes: u16 = m.parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }
        Ok(Self(hours * 60 + minutes))
    }

    /// Returns the minute offset from midnight.
    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for MinuteOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for MinuteOfDay {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Half-open interval intersection test.
///
/// Zero-length intervals never overlap anything.
pub fn overlaps(a_start: u16, a_end: u16, b_start: u16, b_end: u16) -> bool {
    a_start.max(b_start) < a_end.min(b_end)
}
