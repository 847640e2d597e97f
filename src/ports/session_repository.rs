use async_trait::async_trait;

use crate::domain::booking::Session;
use crate::domain::foundation::{DateKey, DomainError, ExpertId, PurchaseId, SessionId, UserId};

/// Persistence for booked sessions.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Stores a batch of freshly booked sessions atomically.
    async fn save_all(&self, sessions: &[Session]) -> Result<(), DomainError>;

    /// Replaces a stored session after a state change.
    async fn update(&self, session: &Session) -> Result<(), DomainError>;

    /// Finds a session by ID.
    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError>;

    /// Lists an expert's sessions on one date, cancelled included.
    async fn find_for_expert_on(
        &self,
        expert_id: &ExpertId,
        date: DateKey,
    ) -> Result<Vec<Session>, DomainError>;

    /// Lists every session drawn from a purchase.
    async fn find_by_purchase(
        &self,
        purchase_id: &PurchaseId,
    ) -> Result<Vec<Session>, DomainError>;

    /// Lists every session served by an expert.
    async fn find_by_expert(&self, expert_id: &ExpertId) -> Result<Vec<Session>, DomainError>;

    /// Lists every session booked by a client.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Session>, DomainError>;
}
