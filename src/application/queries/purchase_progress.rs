//! Per-purchase progress for a client dashboard.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::feedback::{feedback_stage, FeedbackStage};
use crate::domain::foundation::{DomainError, ErrorCode, PurchaseId, UserId};
use crate::ports::{Clock, FeedbackRepository, PurchaseRepository, SessionRepository};

/// Query for one purchase's progress.
#[derive(Debug, Clone)]
pub struct PurchaseProgressQuery {
    pub user_id: UserId,
    pub purchase_id: PurchaseId,
}

/// Where the purchase stands: hours, sessions, and the feedback gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PurchaseProgress {
    pub hours_remaining: f64,
    pub sessions_booked: usize,
    pub sessions_cancelled: usize,
    pub stage: FeedbackStage,
}

/// Handler for the purchase progress query.
pub struct PurchaseProgressQueryHandler {
    purchases: Arc<dyn PurchaseRepository>,
    sessions: Arc<dyn SessionRepository>,
    feedback: Arc<dyn FeedbackRepository>,
    clock: Arc<dyn Clock>,
}

impl PurchaseProgressQueryHandler {
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
        query: PurchaseProgressQuery,
    ) -> Result<PurchaseProgress, DomainError> {
        let purchase = self
            .purchases
            .find_by_id(&query.purchase_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PurchaseNotFound, "Purchase not found")
            })?;
        purchase.authorize(&query.user_id)?;

        let sessions = self.sessions.find_by_purchase(&query.purchase_id).await?;
        let has_feedback = self
            .feedback
            .exists_for(&query.user_id, &query.purchase_id)
            .await?;
        let now = self.clock.now();

        Ok(PurchaseProgress {
            hours_remaining: purchase.hours_remaining(),
            sessions_booked: sessions.iter().filter(|s| !s.is_cancelled()).count(),
            sessions_cancelled: sessions.iter().filter(|s| s.is_cancelled()).count(),
            stage: feedback_stage(&purchase, &sessions, has_feedback, now),
        })
    }
}
