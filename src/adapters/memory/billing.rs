//! In-memory append-only billing ledgers.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::billing::{ClientPayment, Payout};
use crate::domain::foundation::{DomainError, ExpertId, UserId};
use crate::ports::{ClientPaymentRepository, PayoutRepository};

/// Payout ledger held in memory, insertion order preserved.
#[derive(Debug, Clone)]
pub struct InMemoryPayoutRepository {
    payouts: Arc<RwLock<Vec<Payout>>>,
}

impl InMemoryPayoutRepository {
    pub fn new() -> Self {
        Self {
            payouts: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryPayoutRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PayoutRepository for InMemoryPayoutRepository {
    async fn append(&self, payout: &Payout) -> Result<(), DomainError> {
        self.payouts.write().await.push(payout.clone());
        Ok(())
    }

    async fn find_by_expert(&self, expert_id: &ExpertId) -> Result<Vec<Payout>, DomainError> {
        Ok(self
            .payouts
            .read()
            .await
            .iter()
            .filter(|p| p.expert_id() == expert_id)
            .cloned()
            .collect())
    }
}

/// Client payment ledger held in memory, insertion order preserved.
#[derive(Debug, Clone)]
pub struct InMemoryClientPaymentRepository {
    payments: Arc<RwLock<Vec<ClientPayment>>>,
}

impl InMemoryClientPaymentRepository {
    pub fn new() -> Self {
        Self {
            payments: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryClientPaymentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientPaymentRepository for InMemoryClientPaymentRepository {
    async fn append(&self, payment: &ClientPayment) -> Result<(), DomainError> {
        self.payments.write().await.push(payment.clone());
        Ok(())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<ClientPayment>, DomainError> {
        Ok(self
            .payments
            .read()
            .await
            .iter()
            .filter(|p| p.user_id() == user_id)
            .cloned()
            .collect())
    }
}
