//! Free-slot resolution for one (expert, date).

use serde::{Deserialize, Serialize};

use crate::domain::booking::Session;
use crate::domain::expert::Expert;
use crate::domain::foundation::{overlaps, DateKey, DomainError, MinuteOfDay, Timestamp, SLOT_MIN};

/// One bookable 30-minute slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    start_min: u16,
    end_min: u16,
}

impl Slot {
    /// Creates a slot starting at the given minute of day.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the slot would run past end of day
    pub fn starting_at(start_min: u16) -> Result<Self, DomainError> {
        // Bound check covers both start and end, since end = start + 30.
        MinuteOfDay::new(start_min + SLOT_MIN)?;
        Ok(Self {
            start_min,
            end_min: start_min + SLOT_MIN,
        })
    }

    /// Returns the slot start (minute of day).
    pub fn start_min(&self) -> u16 {
        self.start_min
    }

    /// Returns the slot end (minute of day).
    pub fn end_min(&self) -> u16 {
        self.end_min
    }

    /// Returns the instant the slot starts on the given date.
    pub fn start_instant(&self, date: DateKey) -> Timestamp {
        date.instant_at(self.start_min)
    }
}

/// Resolves the bookable spans for a date, highest priority first.
///
/// 1. Explicit windows declared for the date (when any exist)
/// 2. A per-date override: day off yields nothing, custom hours yield
///    one span
/// 3. The expert's default weekly pattern
///
/// Exactly one layer contributes; an empty window set falls through to
/// the next layer rather than blanking the day.
fn bookable_spans(
    expert: &Expert,
    date: DateKey,
    day_override: Option<&super::DayOverride>,
    window_set: Option<&super::WindowSet>,
) -> Vec<(u16, u16)> {
    window_set
        .filter(|set| !set.is_empty())
        .map(|set| {
            set.windows()
                .iter()
                .map(|w| (w.start_min(), w.end_min()))
                .collect()
        })
        .or_else(|| {
            day_override.map(|ov| {
                if ov.is_workday() {
                    vec![(ov.day_start(), ov.day_end())]
                } else {
                    Vec::new()
                }
            })
        })
        .unwrap_or_else(|| {
            if expert.works_on(date.weekday_index()) {
                vec![(expert.day_start(), expert.day_end())]
            } else {
                Vec::new()
            }
        })
}

/// Computes the free 30-minute slots for an expert on a date.
///
/// Slots are cut from the resolved spans on a fixed 30-minute grid
/// anchored at each span's start; a trailing remainder shorter than a
/// slot is dropped. Slots taken by a non-cancelled session on the same
/// date are excluded. Output is ascending by start and deterministic
/// for identical inputs.
pub fn free_slots(
    expert: &Expert,
    date: DateKey,
    sessions: &[Session],
    day_override: Option<&super::DayOverride>,
    window_set: Option<&super::WindowSet>,
) -> Vec<Slot> {
    let booked: Vec<(u16, u16)> = sessions
        .iter()
        .filter(|s| s.expert_id() == expert.id() && s.date() == date && !s.is_cancelled())
        .map(|s| (s.start_min(), s.end_min()))
        .collect();

    let mut slots = Vec::new();
    for (span_start, span_end) in bookable_spans(expert, date, day_override, window_set) {
        let mut t = span_start;
        while t + SLOT_MIN <= span_end {
            let taken = booked
                .iter()
                .any(|(s, e)| overlaps(*s, *e, t, t + SLOT_MIN));
            if !taken {
                slots.push(Slot {
                    start_min: t,
                    end_min: t + SLOT_MIN,
                });
            }
            t += SLOT_MIN;
        }
    }
    slots.sort_by_key(|s| s.start_min);
    slots
}
