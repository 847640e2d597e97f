//! Per-date override of an expert's default working hours.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DateKey, DomainError, ExpertId, MINUTES_PER_DAY};

/// Overrides the expert's default weekday pattern for one date.
///
/// At most one override exists per (expert, date); the last write
/// replaces. `workday = false` marks the whole date off regardless of
/// hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOverride {
    expert_id: ExpertId,
    date: DateKey,
    workday: bool,
    day_start: u16,
    day_end: u16,
}

impl DayOverride {
    /// Creates an override marking the date as a working day with
    /// custom hours.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if hours are inverted or past end of day
    pub fn working(
        expert_id: ExpertId,
        date: DateKey,
        day_start: u16,
        day_end: u16,
    ) -> Result<Self, DomainError> {
        if day_start >= day_end || day_end > MINUTES_PER_DAY {
            return Err(DomainError::validation(
                "day_end",
                "Override hours must end after they start, within the day",
            ));
        }
        Ok(Self {
            expert_id,
            date,
            workday: true,
            day_start,
            day_end,
        })
    }

    /// Creates an override marking the date as fully off.
    pub fn day_off(expert_id: ExpertId, date: DateKey) -> Self {
        Self {
            expert_id,
            date,
            workday: false,
            day_start: 0,
            day_end: 0,
        }
    }

    /// Returns the expert this override applies to.
    pub fn expert_id(&self) -> &ExpertId {
        &self.expert_id
    }

    /// Returns the date this override applies to.
    pub fn date(&self) -> DateKey {
        self.date
    }

    /// Whether the expert works this date at all.
    pub fn is_workday(&self) -> bool {
        self.workday
    }

    /// Returns the override day start (minute of day).
    pub fn day_start(&self) -> u16 {
        self.day_start
    }

    /// Returns the override day end (minute of day).
    pub fn day_end(&self) -> u16 {
        self.day_end
    }
}
