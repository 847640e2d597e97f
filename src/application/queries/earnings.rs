//! Earnings reconciliation for one expert.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::billing::{expert_due, expert_earned, expert_hours_completed, expert_paid};
use crate::domain::foundation::{DomainError, ExpertId};
use crate::ports::{Clock, ExpertCatalog, PayoutRepository, SessionRepository};

/// Query for an expert's earnings position.
#[derive(Debug, Clone)]
pub struct EarningsQuery {
    pub expert_id: ExpertId,
}

/// Derived earnings figures at the query instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EarningsReport {
    pub hours_completed: f64,
    pub earned: f64,
    pub paid: i64,
    pub due: f64,
}

/// Handler for the earnings query.
pub struct EarningsQueryHandler {
    experts: Arc<dyn ExpertCatalog>,
    sessions: Arc<dyn SessionRepository>,
    payouts: Arc<dyn PayoutRepository>,
    clock: Arc<dyn Clock>,
}

impl EarningsQueryHandler {
    pub fn new(
        experts: Arc<dyn ExpertCatalog>,
        sessions: Arc<dyn SessionRepository>,
        payouts: Arc<dyn PayoutRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            experts,
            sessions,
            payouts,
            clock,
        }
    }

    pub async fn handle(&self, query: EarningsQuery) -> Result<EarningsReport, DomainError> {
        let expert = self
            .experts
            .find_by_id(&query.expert_id)
            .await?
            .ok_or_else(|| DomainError::validation("expert_id", "Unknown expert"))?;

        let sessions = self.sessions.find_by_expert(&query.expert_id).await?;
        let payouts = self.payouts.find_by_expert(&query.expert_id).await?;
        let now = self.clock.now();

        Ok(EarningsReport {
            hours_completed: expert_hours_completed(&expert, &sessions, now),
            earned: expert_earned(&expert, &sessions, now),
            paid: expert_paid(&payouts),
            due: expert_due(&expert, &sessions, &payouts, now),
        })
    }
}
