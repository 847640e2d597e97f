use async_trait::async_trait;

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{DomainError, ExpertId, PurchaseId, UserId};

/// Persistence for submitted feedback.
#[async_trait]
pub trait FeedbackRepository: Send + Sync {
    /// Stores a feedback entry.
    async fn save(&self, feedback: &Feedback) -> Result<(), DomainError>;

    /// Whether the user already left feedback for the purchase.
    async fn exists_for(
        &self,
        user_id: &UserId,
        purchase_id: &PurchaseId,
    ) -> Result<bool, DomainError>;

    /// Lists feedback left for an expert, oldest first.
    async fn find_by_expert(&self, expert_id: &ExpertId) -> Result<Vec<Feedback>, DomainError>;
}
