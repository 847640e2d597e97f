//! In-memory availability stores, keyed by (expert, date).

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::availability::{DayOverride, WindowSet};
use crate::domain::foundation::{DateKey, DomainError, ExpertId};
use crate::ports::{DayOverrideRepository, WindowSetRepository};

/// Day override store held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDayOverrideRepository {
    overrides: Arc<RwLock<HashMap<(ExpertId, DateKey), DayOverride>>>,
}

impl InMemoryDayOverrideRepository {
    pub fn new() -> Self {
        Self {
            overrides: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryDayOverrideRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DayOverrideRepository for InMemoryDayOverrideRepository {
    async fn upsert(&self, day_override: &DayOverride) -> Result<(), DomainError> {
        self.overrides.write().await.insert(
            (*day_override.expert_id(), day_override.date()),
            day_override.clone(),
        );
        Ok(())
    }

    async fn find(
        &self,
        expert_id: &ExpertId,
        date: DateKey,
    ) -> Result<Option<DayOverride>, DomainError> {
        Ok(self.overrides.read().await.get(&(*expert_id, date)).cloned())
    }

    async fn delete(&self, expert_id: &ExpertId, date: DateKey) -> Result<(), DomainError> {
        self.overrides.write().await.remove(&(*expert_id, date));
        Ok(())
    }

    async fn find_by_expert(
        &self,
        expert_id: &ExpertId,
    ) -> Result<Vec<DayOverride>, DomainError> {
        let overrides = self.overrides.read().await;
        let mut owned: Vec<DayOverride> = overrides
            .values()
            .filter(|o| o.expert_id() == expert_id)
            .cloned()
            .collect();
        owned.sort_by_key(|o| o.date());
        Ok(owned)
    }
}

/// Window set store held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryWindowSetRepository {
    sets: Arc<RwLock<HashMap<(ExpertId, DateKey), WindowSet>>>,
}

impl InMemoryWindowSetRepository {
    pub fn new() -> Self {
        Self {
            sets: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryWindowSetRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WindowSetRepository for InMemoryWindowSetRepository {
    async fn upsert(&self, set: &WindowSet) -> Result<(), DomainError> {
        self.sets
            .write()
            .await
            .insert((*set.expert_id(), set.date()), set.clone());
        Ok(())
    }

    async fn find(
        &self,
        expert_id: &ExpertId,
        date: DateKey,
    ) -> Result<Option<WindowSet>, DomainError> {
        Ok(self.sets.read().await.get(&(*expert_id, date)).cloned())
    }

    async fn delete(&self, expert_id: &ExpertId, date: DateKey) -> Result<(), DomainError> {
        self.sets.write().await.remove(&(*expert_id, date));
        Ok(())
    }
}
