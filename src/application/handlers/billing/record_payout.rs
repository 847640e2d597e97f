//! RecordPayoutHandler - appends a payout to an expert.

use std::sync::Arc;

use crate::domain::billing::Payout;
use crate::domain::foundation::{DomainError, ExpertId, PayoutId};
use crate::ports::{Clock, ExpertCatalog, PayoutRepository};

/// Command to record money paid out to an expert.
#[derive(Debug, Clone)]
pub struct RecordPayoutCommand {
    pub expert_id: ExpertId,
    pub amount: i64,
    pub note: Option<String>,
}

/// Result carrying the stored payout.
#[derive(Debug, Clone)]
pub struct RecordPayoutResult {
    pub payout: Payout,
}

/// Handler for recording payouts. The ledger is append-only; there is
/// no edit or delete.
pub struct RecordPayoutHandler {
    experts: Arc<dyn ExpertCatalog>,
    payouts: Arc<dyn PayoutRepository>,
    clock: Arc<dyn Clock>,
}

impl RecordPayoutHandler {
    pub fn new(
        experts: Arc<dyn ExpertCatalog>,
        payouts: Arc<dyn PayoutRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            experts,
            payouts,
            clock,
        }
    }

    pub async fn handle(&self, cmd: RecordPayoutCommand) -> Result<RecordPayoutResult, DomainError> {
        self.experts
            .find_by_id(&cmd.expert_id)
            .await?
            .ok_or_else(|| DomainError::validation("expert_id", "Unknown expert"))?;

        let payout = Payout::new(
            PayoutId::new(),
            cmd.expert_id,
            cmd.amount,
            cmd.note,
            self.clock.now(),
        )?;
        self.payouts.append(&payout).await?;

        tracing::debug!(
            expert_id = %cmd.expert_id,
            amount = cmd.amount,
            "payout recorded"
        );

        Ok(RecordPayoutResult { payout })
    }
}
