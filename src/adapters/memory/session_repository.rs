//! In-memory session repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::Session;
use crate::domain::foundation::{
    DateKey, DomainError, ErrorCode, ExpertId, PurchaseId, SessionId, UserId,
};
use crate::ports::SessionRepository;

/// Session store held in memory.
#[derive(Debug, Clone)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn sorted(mut sessions: Vec<Session>) -> Vec<Session> {
        sessions.sort_by_key(|s| (s.date(), s.start_min()));
        sessions
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save_all(&self, sessions: &[Session]) -> Result<(), DomainError> {
        let mut store = self.sessions.write().await;
        for session in sessions {
            store.insert(*session.id(), session.clone());
        }
        Ok(())
    }

    async fn update(&self, session: &Session) -> Result<(), DomainError> {
        let mut store = self.sessions.write().await;
        if !store.contains_key(session.id()) {
            return Err(DomainError::new(
                ErrorCode::SessionNotFound,
                "Session not found",
            ));
        }
        store.insert(*session.id(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn find_for_expert_on(
        &self,
        expert_id: &ExpertId,
        date: DateKey,
    ) -> Result<Vec<Session>, DomainError> {
        let store = self.sessions.read().await;
        Ok(Self::sorted(
            store
                .values()
                .filter(|s| s.expert_id() == expert_id && s.date() == date)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_purchase(
        &self,
        purchase_id: &PurchaseId,
    ) -> Result<Vec<Session>, DomainError> {
        let store = self.sessions.read().await;
        Ok(Self::sorted(
            store
                .values()
                .filter(|s| s.purchase_id() == purchase_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_expert(&self, expert_id: &ExpertId) -> Result<Vec<Session>, DomainError> {
        let store = self.sessions.read().await;
        Ok(Self::sorted(
            store
                .values()
                .filter(|s| s.expert_id() == expert_id)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Session>, DomainError> {
        let store = self.sessions.read().await;
        Ok(Self::sorted(
            store
                .values()
                .filter(|s| s.user_id() == user_id)
                .cloned()
                .collect(),
        ))
    }
}
