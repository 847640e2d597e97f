//! Session aggregate - one booked 30-minute slot.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::domain::availability::Slot;
use crate::domain::foundation::{
    overlaps, DateKey, DomainError, ErrorCode, ExpertId, PurchaseId, SessionId, Timestamp, UserId,
};

/// Minimum notice, in hours, for cancelling a session.
pub const CANCEL_NOTICE_HOURS: i64 = 24;

/// Opaque meeting link handed to both parties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeetingLink(String);

impl MeetingLink {
    /// Generates a fresh opaque link.
    pub fn generate() -> Self {
        let token = Uuid::new_v4().simple().to_string();
        Self(format!("https://meet.example.com/{}", &token[..8]))
    }

    /// Returns the link as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MeetingLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persisted session state.
///
/// Upcoming/completed are never stored; they are derived from the
/// clock on every read. Only cancellation is a true state change, and
/// it is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    Scheduled,
    Cancelled {
        reason: String,
        cancelled_by: UserId,
        cancelled_at: Timestamp,
    },
}

/// Session status as seen by callers at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Upcoming => "upcoming",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// One booked 30-minute consultation slot.
///
/// # Invariants
///
/// - `end_min - start_min` equals the slot length (guaranteed by
///   [`Slot`] construction)
/// - cancellation is one-way; a cancelled session never changes again
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,
    user_id: UserId,
    expert_id: ExpertId,
    purchase_id: PurchaseId,
    date: DateKey,
    start_min: u16,
    end_min: u16,
    link: MeetingLink,
    state: SessionState,
    created_at: Timestamp,
}

impl Session {
    /// Books a session for the given slot with a freshly generated
    /// meeting link.
    pub fn book(
        id: SessionId,
        user_id: UserId,
        expert_id: ExpertId,
        purchase_id: PurchaseId,
        date: DateKey,
        slot: Slot,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            expert_id,
            purchase_id,
            date,
            start_min: slot.start_min(),
            end_min: slot.end_min(),
            link: MeetingLink::generate(),
            state: SessionState::Scheduled,
            created_at,
        }
    }

    /// Reconstitute a session from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SessionId,
        user_id: UserId,
        expert_id: ExpertId,
        purchase_id: PurchaseId,
        date: DateKey,
        start_min: u16,
        end_min: u16,
        link: MeetingLink,
        state: SessionState,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            expert_id,
            purchase_id,
            date,
            start_min,
            end_min,
            link,
            state,
            created_at,
        }
    }

    /// Returns the session ID.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Returns the attending client.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the serving expert.
    pub fn expert_id(&self) -> &ExpertId {
        &self.expert_id
    }

    /// Returns the purchase the slot was paid from.
    pub fn purchase_id(&self) -> &PurchaseId {
        &self.purchase_id
    }

    /// Returns the session date.
    pub fn date(&self) -> DateKey {
        self.date
    }

    /// Returns the slot start (minute of day).
    pub fn start_min(&self) -> u16 {
        self.start_min
    }

    /// Returns the slot end (minute of day).
    pub fn end_min(&self) -> u16 {
        self.end_min
    }

    /// Returns the session duration in minutes.
    pub fn duration_min(&self) -> u16 {
        self.end_min - self.start_min
    }

    /// Returns the meeting link.
    pub fn link(&self) -> &MeetingLink {
        &self.link
    }

    /// Returns the persisted state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns when the session was booked.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the instant the session starts.
    pub fn start_instant(&self) -> Timestamp {
        self.date.instant_at(self.start_min)
    }

    /// Whether the session has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.state, SessionState::Cancelled { .. })
    }

    /// Derives the caller-visible status at the given instant.
    ///
    /// Pure and idempotent; safe to recompute on every read.
    pub fn status(&self, now: Timestamp) -> SessionStatus {
        if self.is_cancelled() {
            SessionStatus::Cancelled
        } else if self.start_instant().is_after(&now) {
            SessionStatus::Upcoming
        } else {
            SessionStatus::Completed
        }
    }

    /// Whether the session may still be cancelled at the given instant.
    ///
    /// True iff not already cancelled and the start is at least
    /// [`CANCEL_NOTICE_HOURS`] away. A session starting exactly 24h
    /// from now is cancellable; one starting a minute less is not.
    pub fn can_cancel(&self, now: Timestamp) -> bool {
        !self.is_cancelled()
            && self.start_instant().duration_since(&now) >= Duration::hours(CANCEL_NOTICE_HOURS)
    }

    /// Cancels the session, recording reason and actor.
    ///
    /// Either the purchasing client or the serving expert may cancel;
    /// the actor is recorded but does not change refund behavior.
    /// Returns the duration in minutes to refund to the purchase.
    ///
    /// # Errors
    ///
    /// - `CancellationWindowClosed` if less than 24h to start or
    ///   already cancelled
    /// - `MissingReason` if the reason is empty or whitespace
    pub fn cancel(
        &mut self,
        reason: &str,
        cancelled_by: UserId,
        now: Timestamp,
    ) -> Result<u16, DomainError> {
        if !self.can_cancel(now) {
            return Err(DomainError::new(
                ErrorCode::CancellationWindowClosed,
                "You can cancel only up to 24 hours before start",
            ));
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(DomainError::new(
                ErrorCode::MissingReason,
                "Please provide a cancellation reason",
            ));
        }
        self.state = SessionState::Cancelled {
            reason: reason.to_string(),
            cancelled_by,
            cancelled_at: now,
        };
        Ok(self.duration_min())
    }

    /// Whether this session occupies any part of the given half-open
    /// interval on its date.
    pub fn clashes_with(&self, start_min: u16, end_min: u16) -> bool {
        overlaps(self.start_min, self.end_min, start_min, end_min)
    }
}
