//! In-memory purchase repository.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::Purchase;
use crate::domain::foundation::{DomainError, ErrorCode, PurchaseId, UserId};
use crate::ports::PurchaseRepository;

/// Purchase store held in memory.
#[derive(Debug, Clone)]
pub struct InMemoryPurchaseRepository {
    purchases: Arc<RwLock<HashMap<PurchaseId, Purchase>>>,
}

impl InMemoryPurchaseRepository {
    pub fn new() -> Self {
        Self {
            purchases: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryPurchaseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PurchaseRepository for InMemoryPurchaseRepository {
    async fn save(&self, purchase: &Purchase) -> Result<(), DomainError> {
        self.purchases
            .write()
            .await
            .insert(*purchase.id(), purchase.clone());
        Ok(())
    }

    async fn update(&self, purchase: &Purchase) -> Result<(), DomainError> {
        let mut purchases = self.purchases.write().await;
        if !purchases.contains_key(purchase.id()) {
            return Err(DomainError::new(
                ErrorCode::PurchaseNotFound,
                "Purchase not found",
            ));
        }
        purchases.insert(*purchase.id(), purchase.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError> {
        Ok(self.purchases.read().await.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Purchase>, DomainError> {
        let purchases = self.purchases.read().await;
        let mut owned: Vec<Purchase> = purchases
            .values()
            .filter(|p| p.user_id() == user_id)
            .cloned()
            .collect();
        owned.sort_by_key(|p| *p.created_at());
        Ok(owned)
    }
}
