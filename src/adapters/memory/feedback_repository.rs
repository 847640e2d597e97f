//! In-memory feedback store.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::feedback::Feedback;
use crate::domain::foundation::{DomainError, ExpertId, PurchaseId, UserId};
use crate::ports::FeedbackRepository;

/// Feedback store held in memory, insertion order preserved.
#[derive(Debug, Clone)]
pub struct InMemoryFeedbackRepository {
    entries: Arc<RwLock<Vec<Feedback>>>,
}

impl InMemoryFeedbackRepository {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryFeedbackRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeedbackRepository for InMemoryFeedbackRepository {
    async fn save(&self, feedback: &Feedback) -> Result<(), DomainError> {
        self.entries.write().await.push(feedback.clone());
        Ok(())
    }

    async fn exists_for(
        &self,
        user_id: &UserId,
        purchase_id: &PurchaseId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .any(|f| f.user_id() == user_id && f.purchase_id() == purchase_id))
    }

    async fn find_by_expert(&self, expert_id: &ExpertId) -> Result<Vec<Feedback>, DomainError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .filter(|f| f.expert_id() == expert_id)
            .cloned()
            .collect())
    }
}
