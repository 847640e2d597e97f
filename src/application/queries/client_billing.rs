//! Billing summary for one client.

use std::sync::Arc;

use crate::domain::billing::{client_billing, ClientBilling};
use crate::domain::foundation::{DomainError, UserId};
use crate::ports::{ClientPaymentRepository, PurchaseRepository};

/// Query for a client's billing position.
#[derive(Debug, Clone)]
pub struct ClientBillingQuery {
    pub user_id: UserId,
}

/// Handler for the client billing query.
pub struct ClientBillingQueryHandler {
    purchases: Arc<dyn PurchaseRepository>,
    payments: Arc<dyn ClientPaymentRepository>,
}

impl ClientBillingQueryHandler {
    pub fn new(
        purchases: Arc<dyn PurchaseRepository>,
        payments: Arc<dyn ClientPaymentRepository>,
    ) -> Self {
        Self {
            purchases,
            payments,
        }
    }

    pub async fn handle(&self, query: ClientBillingQuery) -> Result<ClientBilling, DomainError> {
        let purchases = self.purchases.find_by_user(&query.user_id).await?;
        let payments = self.payments.find_by_user(&query.user_id).await?;
        Ok(client_billing(&purchases, &payments))
    }
}
