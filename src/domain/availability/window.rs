//! Explicit bookable windows declared for a single date.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    overlaps, DateKey, DomainError, ErrorCode, ExpertId, MinuteOfDay, SLOT_MIN,
};

/// Contiguous span of bookable time within one day, minute precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    start_min: u16,
    end_min: u16,
}

impl TimeWindow {
    /// Creates a window, enforcing the minimum bookable length.
    ///
    /// # Errors
    ///
    /// - `WindowTooShort` if the window is inverted or shorter than one
    ///   slot
    pub fn new(start_min: u16, end_min: u16) -> Result<Self, DomainError> {
        if end_min <= start_min || end_min - start_min < SLOT_MIN {
            return Err(DomainError::new(
                ErrorCode::WindowTooShort,
                format!("Minimum window is {} minutes", SLOT_MIN),
            ));
        }
        // Reuse the minute-of-day bound check for the end (start < end).
        MinuteOfDay::new(end_min)?;
        Ok(Self { start_min, end_min })
    }

    /// Returns the window start (minute of day).
    pub fn start_min(&self) -> u16 {
        self.start_min
    }

    /// Returns the window end (minute of day).
    pub fn end_min(&self) -> u16 {
        self.end_min
    }
}

/// Ordered set of disjoint windows for one (expert, date).
///
/// When non-empty, these windows define the bookable span for the date
/// and take priority over overrides and defaults. An empty set is
/// treated as absent by the resolver, never as a day off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSet {
    expert_id: ExpertId,
    date: DateKey,
    windows: Vec<TimeWindow>,
}

impl WindowSet {
    /// Creates an empty window set for the given expert and date.
    pub fn new(expert_id: ExpertId, date: DateKey) -> Self {
        Self {
            expert_id,
            date,
            windows: Vec::new(),
        }
    }

    /// Reconstitute a window set from persistence.
    pub fn reconstitute(expert_id: ExpertId, date: DateKey, windows: Vec<TimeWindow>) -> Self {
        Self {
            expert_id,
            date,
            windows,
        }
    }

    /// Returns the expert this set belongs to.
    pub fn expert_id(&self) -> &ExpertId {
        &self.expert_id
    }

    /// Returns the date this set applies to.
    pub fn date(&self) -> DateKey {
        self.date
    }

    /// Returns the windows in ascending start order.
    pub fn windows(&self) -> &[TimeWindow] {
        &self.windows
    }

    /// Whether no windows are declared.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Adds a window, keeping the set sorted by start.
    ///
    /// `booked` carries the [start, end) intervals of non-cancelled
    /// sessions already on this date; a new window must not clash with
    /// them or with an existing window.
    ///
    /// # Errors
    ///
    /// - `OverlappingWindow` on any clash
    pub fn add_window(
        &mut self,
        window: TimeWindow,
        booked: &[(u16, u16)],
    ) -> Result<(), DomainError> {
        if self
            .windows
            .iter()
            .any(|w| overlaps(w.start_min, w.end_min, window.start_min, window.end_min))
        {
            return Err(DomainError::new(
                ErrorCode::OverlappingWindow,
                "Overlaps an existing window",
            ));
        }
        if booked
            .iter()
            .any(|(s, e)| overlaps(*s, *e, window.start_min, window.end_min))
        {
            return Err(DomainError::new(
                ErrorCode::OverlappingWindow,
                "Clashes with a booked session",
            ));
        }
        self.windows.push(window);
        self.windows.sort_by_key(|w| w.start_min);
        Ok(())
    }

    /// Removes the window starting at the given minute.
    ///
    /// Returns true if a window was removed.
    pub fn remove_window(&mut self, start_min: u16) -> bool {
        let before = self.windows.len();
        self.windows.retain(|w| w.start_min != start_min);
        self.windows.len() != before
    }
}
