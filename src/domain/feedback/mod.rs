//! Feedback module - the per-purchase feedback gate.
//!
//! A client may leave feedback for a purchase only once, and only
//! after the package is exhausted and every session drawn from it has
//! run its course.

use serde::{Deserialize, Serialize};

use crate::domain::booking::{Purchase, Session, SessionStatus};
use crate::domain::foundation::{
    DomainError, ErrorCode, ExpertId, FeedbackId, PurchaseId, Rating, Timestamp, UserId,
};

/// One rating-plus-text review tied to a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    id: FeedbackId,
    user_id: UserId,
    expert_id: ExpertId,
    purchase_id: PurchaseId,
    rating: Rating,
    text: Option<String>,
    created_at: Timestamp,
}

impl Feedback {
    /// Creates a feedback entry. The rating is mandatory; text is not.
    pub fn new(
        id: FeedbackId,
        user_id: UserId,
        expert_id: ExpertId,
        purchase_id: PurchaseId,
        rating: Rating,
        text: Option<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            expert_id,
            purchase_id,
            rating,
            text: text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
            created_at,
        }
    }

    /// Returns the feedback ID.
    pub fn id(&self) -> &FeedbackId {
        &self.id
    }

    /// Returns the reviewing client.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the reviewed expert.
    pub fn expert_id(&self) -> &ExpertId {
        &self.expert_id
    }

    /// Returns the purchase the review covers.
    pub fn purchase_id(&self) -> &PurchaseId {
        &self.purchase_id
    }

    /// Returns the rating.
    pub fn rating(&self) -> Rating {
        self.rating
    }

    /// Returns the optional review text.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns when the feedback was left.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Where a purchase sits in its feedback lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStage {
    /// Hours remain, or nothing has been booked yet.
    HoursAvailable,
    /// All hours spent but a session has not started yet.
    AwaitingCompletion,
    /// Every session done; feedback may be submitted.
    EligibleForFeedback,
    /// Feedback already left; terminal.
    FeedbackSubmitted,
}

/// Derives the feedback stage of a purchase at the given instant.
///
/// `sessions` must be the sessions drawn from this purchase, cancelled
/// ones included. Cancelled sessions refund their time, so they never
/// hold the gate open on their own.
pub fn feedback_stage(
    purchase: &Purchase,
    sessions: &[Session],
    has_feedback: bool,
    now: Timestamp,
) -> FeedbackStage {
    if has_feedback {
        return FeedbackStage::FeedbackSubmitted;
    }
    if !purchase.is_exhausted() || sessions.is_empty() {
        return FeedbackStage::HoursAvailable;
    }
    if sessions.iter().any(|s| s.status(now) == SessionStatus::Upcoming) {
        return FeedbackStage::AwaitingCompletion;
    }
    FeedbackStage::EligibleForFeedback
}

/// Checks that feedback may be submitted for the purchase right now.
///
/// # Errors
///
/// - `DuplicateFeedback` if feedback was already left
/// - `ValidationFailed` for any other stage than eligible
pub fn ensure_eligible(
    purchase: &Purchase,
    sessions: &[Session],
    has_feedback: bool,
    now: Timestamp,
) -> Result<(), DomainError> {
    match feedback_stage(purchase, sessions, has_feedback, now) {
        FeedbackStage::EligibleForFeedback => Ok(()),
        FeedbackStage::FeedbackSubmitted => Err(DomainError::new(
            ErrorCode::DuplicateFeedback,
            "Feedback was already submitted for this purchase",
        )),
        FeedbackStage::HoursAvailable => Err(DomainError::new(
            ErrorCode::ValidationFailed,
            "Feedback opens once all purchased hours are used",
        )),
        FeedbackStage::AwaitingCompletion => Err(DomainError::new(
            ErrorCode::ValidationFailed,
            "Feedback opens once all sessions have taken place",
        )),
    }
}

/// Average submitted rating for an expert, or the directory base
/// rating when none exists yet.
pub fn effective_rating(base_rating: f64, feedback: &[Feedback]) -> f64 {
    if feedback.is_empty() {
        return base_rating;
    }
    let sum: u32 = feedback.iter().map(|f| f.rating().value() as u32).sum();
    let avg = sum as f64 / feedback.len() as f64;
    (avg * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::availability::Slot;
    use crate::domain::foundation::{DateKey, SessionId};

    fn user() -> UserId {
        UserId::new("client-1").unwrap()
    }

    fn monday() -> DateKey {
        DateKey::from_ymd(2025, 3, 10).unwrap()
    }

    fn purchase_of_one_hour() -> Purchase {
        Purchase::new(PurchaseId::new(), user(), ExpertId::new(), 1, 1500, Timestamp::now())
            .unwrap()
    }

    fn session_for(purchase: &Purchase, start_min: u16) -> Session {
        Session::book(
            SessionId::new(),
            user(),
            purchase.expert_id().clone(),
            purchase.id().clone(),
            monday(),
            Slot::starting_at(start_min).unwrap(),
            Timestamp::now(),
        )
    }

    #[test]
    fn fresh_purchase_has_hours_available() {
        let p = purchase_of_one_hour();
        let now = Timestamp::now();
        assert_eq!(feedback_stage(&p, &[], false, now), FeedbackStage::HoursAvailable);
    }

    #[test]
    fn exhausted_purchase_with_upcoming_session_awaits_completion() {
        let mut p = purchase_of_one_hour();
        p.deduct(60).unwrap();
        let sessions = vec![session_for(&p, 540), session_for(&p, 570)];
        let before_start = monday().instant_at(0);

        assert_eq!(
            feedback_stage(&p, &sessions, false, before_start),
            FeedbackStage::AwaitingCompletion
        );
    }

    #[test]
    fn exhausted_purchase_with_all_sessions_past_is_eligible() {
        let mut p = purchase_of_one_hour();
        p.deduct(60).unwrap();
        let sessions = vec![session_for(&p, 540), session_for(&p, 570)];
        let after_both = monday().instant_at(700);

        assert_eq!(
            feedback_stage(&p, &sessions, false, after_both),
            FeedbackStage::EligibleForFeedback
        );
        assert!(ensure_eligible(&p, &sessions, false, after_both).is_ok());
    }

    #[test]
    fn submitted_feedback_is_terminal() {
        let mut p = purchase_of_one_hour();
        p.deduct(60).unwrap();
        let sessions = vec![session_for(&p, 540)];
        let later = monday().instant_at(700);

        assert_eq!(
            feedback_stage(&p, &sessions, true, later),
            FeedbackStage::FeedbackSubmitted
        );
        let result = ensure_eligible(&p, &sessions, true, later);
        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::DuplicateFeedback, .. })
        ));
    }

    #[test]
    fn cancelled_sessions_do_not_hold_the_gate_open() {
        let mut p = purchase_of_one_hour();
        p.deduct(60).unwrap();
        let kept = session_for(&p, 540);
        let mut dropped = session_for(&p, 900);
        let cancel_at = dropped.start_instant().plus_days(-2);
        dropped.cancel("conflict", user(), cancel_at).unwrap();
        p.refund(30);

        // Refund reopened the balance, so hours are available again.
        let now = monday().instant_at(700);
        assert_eq!(
            feedback_stage(&p, &[kept, dropped], false, now),
            FeedbackStage::HoursAvailable
        );
    }

    #[test]
    fn blank_feedback_text_is_dropped() {
        let f = Feedback::new(
            FeedbackId::new(),
            user(),
            ExpertId::new(),
            PurchaseId::new(),
            Rating::try_from_u8(5).unwrap(),
            Some("  ".to_string()),
            Timestamp::now(),
        );
        assert_eq!(f.text(), None);
    }

    #[test]
    fn effective_rating_falls_back_to_base() {
        assert_eq!(effective_rating(4.7, &[]), 4.7);
    }

    #[test]
    fn effective_rating_averages_submissions() {
        let mk = |r: u8| {
            Feedback::new(
                FeedbackId::new(),
                user(),
                ExpertId::new(),
                PurchaseId::new(),
                Rating::try_from_u8(r).unwrap(),
                None,
                Timestamp::now(),
            )
        };
        assert_eq!(effective_rating(4.0, &[mk(5), mk(4)]), 4.5);
        assert_eq!(effective_rating(4.0, &[mk(5), mk(4), mk(4)]), 4.33);
    }
}
