//! RecordClientPaymentHandler - appends a payment from a client.

use std::sync::Arc;

use crate::domain::billing::ClientPayment;
use crate::domain::foundation::{ClientPaymentId, DomainError, UserId};
use crate::ports::{Clock, ClientPaymentRepository};

/// Command to record money received from a client.
#[derive(Debug, Clone)]
pub struct RecordClientPaymentCommand {
    pub user_id: UserId,
    pub amount: i64,
    pub note: Option<String>,
}

/// Result carrying the stored payment.
#[derive(Debug, Clone)]
pub struct RecordClientPaymentResult {
    pub payment: ClientPayment,
}

/// Handler for recording client payments.
pub struct RecordClientPaymentHandler {
    payments: Arc<dyn ClientPaymentRepository>,
    clock: Arc<dyn Clock>,
}

impl RecordClientPaymentHandler {
    pub fn new(payments: Arc<dyn ClientPaymentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { payments, clock }
    }

    pub async fn handle(
        &self,
        cmd: RecordClientPaymentCommand,
    ) -> Result<RecordClientPaymentResult, DomainError> {
        let payment = ClientPayment::new(
            ClientPaymentId::new(),
            cmd.user_id.clone(),
            cmd.amount,
            cmd.note,
            self.clock.now(),
        )?;
        self.payments.append(&payment).await?;

        tracing::debug!(
            user_id = %cmd.user_id,
            amount = cmd.amount,
            "client payment recorded"
        );

        Ok(RecordClientPaymentResult { payment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{FixedClock, InMemoryClientPaymentRepository};
    use crate::domain::foundation::Timestamp;

    #[tokio::test]
    async fn appends_payments_for_the_client() {
        let payments = Arc::new(InMemoryClientPaymentRepository::new());
        let handler = RecordClientPaymentHandler::new(
            payments.clone(),
            Arc::new(FixedClock::at(Timestamp::now())),
        );
        let user = UserId::new("client-1").unwrap();

        handler
            .handle(RecordClientPaymentCommand {
                user_id: user.clone(),
                amount: 3000,
                note: Some("bank transfer".to_string()),
            })
            .await
            .unwrap();

        let stored = payments.find_by_user(&user).await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].amount(), 3000);
        assert_eq!(stored[0].note(), Some("bank transfer"));
    }

    #[tokio::test]
    async fn rejects_non_positive_amount() {
        let payments = Arc::new(InMemoryClientPaymentRepository::new());
        let handler = RecordClientPaymentHandler::new(
            payments.clone(),
            Arc::new(FixedClock::at(Timestamp::now())),
        );
        let user = UserId::new("client-1").unwrap();

        let result = handler
            .handle(RecordClientPaymentCommand {
                user_id: user.clone(),
                amount: -10,
                note: None,
            })
            .await;

        assert!(result.is_err());
        assert!(payments.find_by_user(&user).await.unwrap().is_empty());
    }
}
