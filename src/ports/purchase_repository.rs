use async_trait::async_trait;

use crate::domain::booking::Purchase;
use crate::domain::foundation::{DomainError, PurchaseId, UserId};

/// Persistence for hour-package purchases.
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Stores a new purchase.
    async fn save(&self, purchase: &Purchase) -> Result<(), DomainError>;

    /// Replaces a stored purchase after its ledger changed.
    async fn update(&self, purchase: &Purchase) -> Result<(), DomainError>;

    /// Finds a purchase by ID.
    async fn find_by_id(&self, id: &PurchaseId) -> Result<Option<Purchase>, DomainError>;

    /// Lists a client's purchases, oldest first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Purchase>, DomainError>;
}
