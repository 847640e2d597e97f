use async_trait::async_trait;

use crate::domain::expert::Expert;
use crate::domain::foundation::{DomainError, ExpertId};

/// Read-only access to the expert directory.
#[async_trait]
pub trait ExpertCatalog: Send + Sync {
    /// Finds an expert by ID.
    async fn find_by_id(&self, id: &ExpertId) -> Result<Option<Expert>, DomainError>;

    /// Lists every expert in the directory.
    async fn list(&self) -> Result<Vec<Expert>, DomainError>;
}
