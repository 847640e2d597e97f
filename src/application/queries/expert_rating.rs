//! Effective rating for one expert.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::feedback::effective_rating;
use crate::domain::foundation::{DomainError, ExpertId};
use crate::ports::{ExpertCatalog, FeedbackRepository};

/// Query for an expert's displayed rating.
#[derive(Debug, Clone)]
pub struct ExpertRatingQuery {
    pub expert_id: ExpertId,
}

/// Rating view: the average of submitted feedback, or the directory
/// base rating when no feedback exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExpertRatingView {
    pub rating: f64,
    pub feedback_count: usize,
}

/// Handler for the rating query.
pub struct ExpertRatingQueryHandler {
    experts: Arc<dyn ExpertCatalog>,
    feedback: Arc<dyn FeedbackRepository>,
}

impl ExpertRatingQueryHandler {
    pub fn new(experts: Arc<dyn ExpertCatalog>, feedback: Arc<dyn FeedbackRepository>) -> Self {
        Self { experts, feedback }
    }

    pub async fn handle(&self, query: ExpertRatingQuery) -> Result<ExpertRatingView, DomainError> {
        let expert = self
            .experts
            .find_by_id(&query.expert_id)
            .await?
            .ok_or_else(|| DomainError::validation("expert_id", "Unknown expert"))?;

        let feedback = self.feedback.find_by_expert(&query.expert_id).await?;
        Ok(ExpertRatingView {
            rating: effective_rating(expert.base_rating(), &feedback),
            feedback_count: feedback.len(),
        })
    }
}
