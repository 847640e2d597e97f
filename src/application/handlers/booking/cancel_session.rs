//! CancelSessionHandler - cancels a session and refunds its time.

use std::sync::Arc;

use crate::application::LockRegistry;
use crate::domain::booking::Session;
use crate::domain::foundation::{
    DomainError, ErrorCode, ExpertId, PurchaseId, SessionId, UserId,
};
use crate::ports::{Clock, PurchaseRepository, SessionRepository};

/// Who is asking for the cancellation.
#[derive(Debug, Clone)]
pub enum CancelActor {
    Client(UserId),
    Expert(ExpertId),
}

/// Command to cancel a booked session.
#[derive(Debug, Clone)]
pub struct CancelSessionCommand {
    pub session_id: SessionId,
    pub actor: CancelActor,
    pub reason: String,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelSessionResult {
    pub session: Session,
    pub hours_refunded: f64,
    pub hours_remaining: f64,
}

/// Handler for cancelling sessions.
///
/// Refunds serialize on the purchase so two concurrent cancellations
/// drawing on the same package cannot race the ledger.
pub struct CancelSessionHandler {
    sessions: Arc<dyn SessionRepository>,
    purchases: Arc<dyn PurchaseRepository>,
    clock: Arc<dyn Clock>,
    locks: LockRegistry<PurchaseId>,
}

impl CancelSessionHandler {
    pub fn new(
        sessions: Arc<dyn SessionRepository>,
        purchases: Arc<dyn PurchaseRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            sessions,
            purchases,
            clock,
            locks: LockRegistry::new(),
        }
    }

    pub async fn handle(
        &self,
        cmd: CancelSessionCommand,
    ) -> Result<CancelSessionResult, DomainError> {
        let mut session = self
            .sessions
            .find_by_id(&cmd.session_id)
            .await?
            .ok_or_else(|| DomainError::new(ErrorCode::SessionNotFound, "Session not found"))?;

        let cancelled_by = match &cmd.actor {
            CancelActor::Client(user_id) => {
                if user_id != session.user_id() {
                    return Err(DomainError::new(
                        ErrorCode::Forbidden,
                        "Session does not belong to user",
                    ));
                }
                user_id.clone()
            }
            CancelActor::Expert(expert_id) => {
                if expert_id != session.expert_id() {
                    return Err(DomainError::new(
                        ErrorCode::Forbidden,
                        "Session is not served by this expert",
                    ));
                }
                UserId::new(expert_id.to_string())?
            }
        };

        let _guard = self.locks.acquire(*session.purchase_id()).await;

        let mut purchase = self
            .purchases
            .find_by_id(session.purchase_id())
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PurchaseNotFound, "Purchase not found")
            })?;

        let now = self.clock.now();
        let refunded_min = session.cancel(&cmd.reason, cancelled_by, now)?;
        purchase.refund(refunded_min as u32);

        self.sessions.update(&session).await?;
        self.purchases.update(&purchase).await?;

        tracing::debug!(
            session_id = %cmd.session_id,
            purchase_id = %purchase.id(),
            refunded_min,
            "session cancelled"
        );

        Ok(CancelSessionResult {
            session,
            hours_refunded: refunded_min as f64 / 60.0,
            hours_remaining: purchase.hours_remaining(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        FixedClock, InMemoryPurchaseRepository, InMemorySessionRepository,
    };
    use crate::domain::availability::Slot;
    use crate::domain::booking::Purchase;
    use crate::domain::foundation::{DateKey, Timestamp};

    fn user() -> UserId {
        UserId::new("client-1").unwrap()
    }

    fn monday() -> DateKey {
        DateKey::from_ymd(2025, 3, 10).unwrap()
    }

    struct Fixture {
        handler: CancelSessionHandler,
        purchases: Arc<InMemoryPurchaseRepository>,
        sessions: Arc<InMemorySessionRepository>,
        session_id: SessionId,
        purchase_id: PurchaseId,
        expert_id: ExpertId,
    }

    /// One-hour purchase with both half hours booked on Monday at
    /// 10:00 and 10:30; clock pinned to `now`.
    async fn fixture(now: Timestamp) -> Fixture {
        let expert_id = ExpertId::new();
        let mut purchase =
            Purchase::new(PurchaseId::new(), user(), expert_id, 1, 1500, now).unwrap();
        purchase.deduct(60).unwrap();
        let purchase_id = *purchase.id();

        let session = Session::book(
            SessionId::new(),
            user(),
            expert_id,
            purchase_id,
            monday(),
            Slot::starting_at(600).unwrap(),
            now,
        );
        let other = Session::book(
            SessionId::new(),
            user(),
            expert_id,
            purchase_id,
            monday(),
            Slot::starting_at(630).unwrap(),
            now,
        );
        let session_id = *session.id();

        let purchases = Arc::new(InMemoryPurchaseRepository::new());
        purchases.save(&purchase).await.unwrap();
        let sessions = Arc::new(InMemorySessionRepository::new());
        sessions.save_all(&[session, other]).await.unwrap();

        Fixture {
            handler: CancelSessionHandler::new(
                sessions.clone(),
                purchases.clone(),
                Arc::new(FixedClock::at(now)),
            ),
            purchases,
            sessions,
            session_id,
            purchase_id,
            expert_id,
        }
    }

    /// Two full days before the booked Monday slots.
    fn two_days_ahead() -> Timestamp {
        DateKey::from_ymd(2025, 3, 8).unwrap().instant_at(600)
    }

    #[tokio::test]
    async fn client_cancellation_refunds_the_half_hour() {
        let fx = fixture(two_days_ahead()).await;

        let result = fx
            .handler
            .handle(CancelSessionCommand {
                session_id: fx.session_id,
                actor: CancelActor::Client(user()),
                reason: "schedule conflict".to_string(),
            })
            .await
            .unwrap();

        assert!(result.session.is_cancelled());
        assert_eq!(result.hours_refunded, 0.5);
        assert_eq!(result.hours_remaining, 0.5);

        let purchase = fx.purchases.find_by_id(&fx.purchase_id).await.unwrap().unwrap();
        assert_eq!(purchase.minutes_remaining(), 30);
        let stored = fx.sessions.find_by_id(&fx.session_id).await.unwrap().unwrap();
        assert!(stored.is_cancelled());
    }

    #[tokio::test]
    async fn expert_may_cancel_their_own_session() {
        let fx = fixture(two_days_ahead()).await;

        let result = fx
            .handler
            .handle(CancelSessionCommand {
                session_id: fx.session_id,
                actor: CancelActor::Expert(fx.expert_id),
                reason: "emergency".to_string(),
            })
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn foreign_expert_is_rejected() {
        let fx = fixture(two_days_ahead()).await;

        let result = fx
            .handler
            .handle(CancelSessionCommand {
                session_id: fx.session_id,
                actor: CancelActor::Expert(ExpertId::new()),
                reason: "emergency".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::Forbidden, .. })
        ));
    }

    #[tokio::test]
    async fn foreign_client_is_rejected() {
        let fx = fixture(two_days_ahead()).await;

        let result = fx
            .handler
            .handle(CancelSessionCommand {
                session_id: fx.session_id,
                actor: CancelActor::Client(UserId::new("client-2").unwrap()),
                reason: "not mine".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::Forbidden, .. })
        ));
    }

    #[tokio::test]
    async fn late_cancellation_is_rejected_and_nothing_changes() {
        // 23 hours before the 10:00 Monday slot.
        let now = DateKey::from_ymd(2025, 3, 9).unwrap().instant_at(660);
        let fx = fixture(now).await;

        let result = fx
            .handler
            .handle(CancelSessionCommand {
                session_id: fx.session_id,
                actor: CancelActor::Client(user()),
                reason: "too late".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::CancellationWindowClosed, .. })
        ));
        let purchase = fx.purchases.find_by_id(&fx.purchase_id).await.unwrap().unwrap();
        assert_eq!(purchase.minutes_remaining(), 0);
    }

    #[tokio::test]
    async fn blank_reason_is_rejected() {
        let fx = fixture(two_days_ahead()).await;

        let result = fx
            .handler
            .handle(CancelSessionCommand {
                session_id: fx.session_id,
                actor: CancelActor::Client(user()),
                reason: "  ".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::MissingReason, .. })
        ));
    }

    #[tokio::test]
    async fn second_cancellation_does_not_refund_twice() {
        let fx = fixture(two_days_ahead()).await;
        let cmd = CancelSessionCommand {
            session_id: fx.session_id,
            actor: CancelActor::Client(user()),
            reason: "conflict".to_string(),
        };
        fx.handler.handle(cmd.clone()).await.unwrap();

        let result = fx.handler.handle(cmd).await;
        assert!(result.is_err());
        let purchase = fx.purchases.find_by_id(&fx.purchase_id).await.unwrap().unwrap();
        assert_eq!(purchase.minutes_remaining(), 30);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let fx = fixture(two_days_ahead()).await;

        let result = fx
            .handler
            .handle(CancelSessionCommand {
                session_id: SessionId::new(),
                actor: CancelActor::Client(user()),
                reason: "conflict".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(DomainError { code: ErrorCode::SessionNotFound, .. })
        ));
    }
}
