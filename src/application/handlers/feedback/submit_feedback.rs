//! SubmitFeedbackHandler - one review per exhausted, completed purchase.

use std::sync::Arc;

use crate::domain::feedback::{ensure_eligible, Feedback};
use crate::domain::foundation::{
    DomainError, ErrorCode, FeedbackId, PurchaseId, Rating, UserId,
};
use crate::ports::{Clock, FeedbackRepository, PurchaseRepository, SessionRepository};

/// Command to submit feedback for a purchase.
#[derive(Debug, Clone)]
pub struct SubmitFeedbackCommand {
    pub user_id: UserId,
    pub purchase_id: PurchaseId,
    /// 1 through 5; absent means the caller skipped the rating.
    pub rating: Option<u8>,
    pub text: Option<String>,
}

/// Result carrying the stored feedback.
#[derive(Debug, Clone)]
pub struct SubmitFeedbackResult {
    pub feedback: Feedback,
}

/// Handler for submitting feedback.
pub struct SubmitFeedbackHandler {
    purchases: Arc<dyn PurchaseRepository>,
    sessions: Arc<dyn SessionRepository>,
    feedback: Arc<dyn FeedbackRepository>,
    clock: Arc<dyn Clock>,
}

impl SubmitFeedbackHandler {
    pub fn new(
        purchases: Arc<dyn PurchaseRepository>,
        sessions: Arc<dyn SessionRepository>,
        feedback: Arc<dyn FeedbackRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            purchases,
            sessions,
            feedback,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitFeedbackCommand,
    ) -> Result<SubmitFeedbackResult, DomainError> {
        let purchase = self
            .purchases
            .find_by_id(&cmd.purchase_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PurchaseNotFound, "Purchase not found")
            })?;
        purchase.authorize(&cmd.user_id)?;

        let rating = cmd.rating.ok_or_else(|| {
            DomainError::new(ErrorCode::MissingRating, "Please select a rating")
        })?;
        let rating = Rating::try_from_u8(rating)?;

        let has_feedback = self
            .feedback
            .exists_for(&cmd.user_id, &cmd.purchase_id)
            .await?;
        let sessions = self.sessions.find_by_purchase(&cmd.purchase_id).await?;
        ensure_eligible(&purchase, &sessions, has_feedback, self.clock.now())?;

        let feedback = Feedback::new(
            FeedbackId::new(),
            cmd.user_id,
            *purchase.expert_id(),
            cmd.purchase_id,
            rating,
            cmd.text,
            self.clock.now(),
        );
        self.feedback.save(&feedback).await?;

        tracing::debug!(
            purchase_id = %cmd.purchase_id,
            expert_id = %purchase.expert_id(),
            rating = feedback.rating().value(),
            "feedback submitted"
        );

        Ok(SubmitFeedbackResult { feedback })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        FixedClock, InMemoryFeedbackRepository, InMemoryPurchaseRepository,
        InMemorySessionRepository,
    };
    use crate::domain::availability::Slot;
    use crate::domain::booking::{Purchase, Session};
    use crate::domain::foundation::{DateKey, ExpertId, SessionId, Timestamp};

    fn user() -> UserId {
        UserId::new("client-1").unwrap()
    }

    fn monday() -> DateKey {
        DateKey::from_ymd(2025, 3, 10).unwrap()
    }

    struct Fixture {
        handler: SubmitFeedbackHandler,
        feedback: Arc<InMemoryFeedbackRepository>,
        purchase_id: PurchaseId,
        expert_id: ExpertId,
    }

    /// Exhausted one-hour purchase with both sessions on Monday
    /// morning; the clock decides whether they are over yet.
    async fn fixture(now: Timestamp) -> Fixture {
        let expert_id = ExpertId::new();
        let mut purchase =
            Purchase::new(PurchaseId::new(), user(), expert_id, 1, 1500, now).unwrap();
        purchase.deduct(60).unwrap();
        let purchase_id = *purchase.id();

        let purchases = Arc::new(InMemoryPurchaseRepository::new());
        purchases.save(&purchase).await.unwrap();

        let sessions = Arc::new(InMemorySessionRepository::new());
        let booked: Vec<Session> = [600u16, 630]
            .iter()
            .map(|start| {
                Session::book(
                    SessionId::new(),
                    user(),
                    expert_id,
                    purchase_id,
                    monday(),
                    Slot::starting_at(*start).unwrap(),
                    now,
                )
            })
            .collect();
        sessions.save_all(&booked).await.unwrap();

        let feedback = Arc::new(InMemoryFeedbackRepository::new());
        Fixture {
            handler: SubmitFeedbackHandler::new(
                purchases,
                sessions,
                feedback.clone(),
                Arc::new(FixedClock::at(now)),
            ),
            feedback,
            purchase_id,
            expert_id,
        }
    }

    fn after_sessions() -> Timestamp {
        monday().instant_at(700)
    }

    fn before_sessions() -> Timestamp {
        monday().instant_at(0)
    }

    #[tokio::test]
    async fn accepts_feedback_once_everything_completed() {
        let fx = fixture(after_sessions()).await;

        let result = fx
            .handler
            .handle(SubmitFeedbackCommand {
                user_id: user(),
                purchase_id: fx.purchase_id,
                rating: Some(5),
                text: Some("Very thorough".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(result.feedback.rating().value(), 5);
        let stored = fx.feedback.find_by_expert(&fx.expert_id).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].text(), Some("Very thorough"));
    }

    #[tokio::test]
    async fn rejects_missing_rating() {
        let fx = fixture(after_sessions()).await;

        let result = fx
            .handler
            .handle(SubmitFeedbackCommand {
                user_id: user(),
                purchase_id: fx.purchase_id,
                rating: None,
                text: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::MissingRating, .. })
        ));
    }

    #[tokio::test]
    async fn rejects_out_of_range_rating() {
        let fx = fixture(after_sessions()).await;

        let result = fx
            .handler
            .handle(SubmitFeedbackCommand {
                user_id: user(),
                purchase_id: fx.purchase_id,
                rating: Some(6),
                text: None,
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn rejects_second_submission() {
        let fx = fixture(after_sessions()).await;
        let cmd = SubmitFeedbackCommand {
            user_id: user(),
            purchase_id: fx.purchase_id,
            rating: Some(4),
            text: None,
        };
        fx.handler.handle(cmd.clone()).await.unwrap();

        let result = fx.handler.handle(cmd).await;
        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::DuplicateFeedback, .. })
        ));
    }

    #[tokio::test]
    async fn rejects_while_sessions_still_upcoming() {
        let fx = fixture(before_sessions()).await;

        let result = fx
            .handler
            .handle(SubmitFeedbackCommand {
                user_id: user(),
                purchase_id: fx.purchase_id,
                rating: Some(5),
                text: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::ValidationFailed, .. })
        ));
    }

    #[tokio::test]
    async fn rejects_foreign_purchase() {
        let fx = fixture(after_sessions()).await;

        let result = fx
            .handler
            .handle(SubmitFeedbackCommand {
                user_id: UserId::new("client-2").unwrap(),
                purchase_id: fx.purchase_id,
                rating: Some(5),
                text: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::Forbidden, .. })
        ));
    }
}
