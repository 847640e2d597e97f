//! In-memory expert catalog.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::expert::Expert;
use crate::domain::foundation::{DomainError, ExpertId};
use crate::ports::ExpertCatalog;

/// Expert directory held in memory, seeded at construction.
#[derive(Debug, Clone)]
pub struct InMemoryExpertCatalog {
    experts: Arc<RwLock<HashMap<ExpertId, Expert>>>,
}

impl InMemoryExpertCatalog {
    pub fn new() -> Self {
        Self {
            experts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Builds a catalog seeded with the given experts.
    pub fn with_experts(experts: Vec<Expert>) -> Self {
        let map = experts.into_iter().map(|e| (*e.id(), e)).collect();
        Self {
            experts: Arc::new(RwLock::new(map)),
        }
    }

    /// Adds or replaces an expert.
    pub async fn insert(&self, expert: Expert) {
        self.experts.write().await.insert(*expert.id(), expert);
    }
}

impl Default for InMemoryExpertCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExpertCatalog for InMemoryExpertCatalog {
    async fn find_by_id(&self, id: &ExpertId) -> Result<Option<Expert>, DomainError> {
        Ok(self.experts.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Expert>, DomainError> {
        let experts = self.experts.read().await;
        let mut all: Vec<Expert> = experts.values().cloned().collect();
        all.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(all)
    }
}
