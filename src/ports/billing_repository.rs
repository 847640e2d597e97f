use async_trait::async_trait;

use crate::domain::billing::{ClientPayment, Payout};
use crate::domain::foundation::{DomainError, ExpertId, UserId};

/// Append-only store of expert payouts.
#[async_trait]
pub trait PayoutRepository: Send + Sync {
    /// Appends a payout record.
    async fn append(&self, payout: &Payout) -> Result<(), DomainError>;

    /// Lists payouts to an expert, oldest first.
    async fn find_by_expert(&self, expert_id: &ExpertId) -> Result<Vec<Payout>, DomainError>;
}

/// Append-only store of client payments.
#[async_trait]
pub trait ClientPaymentRepository: Send + Sync {
    /// Appends a payment record.
    async fn append(&self, payment: &ClientPayment) -> Result<(), DomainError>;

    /// Lists payments from a client, oldest first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<ClientPayment>, DomainError>;
}
