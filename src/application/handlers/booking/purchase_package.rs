//! PurchasePackageHandler - buys a prepaid hour package with an expert.

use std::sync::Arc;

use crate::domain::booking::Purchase;
use crate::domain::foundation::{DomainError, ExpertId, PurchaseId, UserId};
use crate::ports::{Clock, ExpertCatalog, PurchaseRepository};

/// Command to purchase an hour package.
#[derive(Debug, Clone)]
pub struct PurchasePackageCommand {
    pub user_id: UserId,
    pub expert_id: ExpertId,
    pub package_hours: u32,
}

/// Result of a successful purchase.
#[derive(Debug, Clone)]
pub struct PurchasePackageResult {
    pub purchase: Purchase,
}

/// Handler for purchasing hour packages.
pub struct PurchasePackageHandler {
    experts: Arc<dyn ExpertCatalog>,
    purchases: Arc<dyn PurchaseRepository>,
    clock: Arc<dyn Clock>,
}

impl PurchasePackageHandler {
    pub fn new(
        experts: Arc<dyn ExpertCatalog>,
        purchases: Arc<dyn PurchaseRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            experts,
            purchases,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: PurchasePackageCommand,
    ) -> Result<PurchasePackageResult, DomainError> {
        let expert = self
            .experts
            .find_by_id(&cmd.expert_id)
            .await?
            .ok_or_else(|| DomainError::validation("expert_id", "Unknown expert"))?;

        let purchase = Purchase::new(
            PurchaseId::new(),
            cmd.user_id,
            cmd.expert_id,
            cmd.package_hours,
            expert.hourly_rate(),
            self.clock.now(),
        )?;

        self.purchases.save(&purchase).await?;

        tracing::debug!(
            purchase_id = %purchase.id(),
            expert_id = %cmd.expert_id,
            package_hours = cmd.package_hours,
            "hour package purchased"
        );

        Ok(PurchasePackageResult { purchase })
    }
}
