use async_trait::async_trait;

use crate::domain::availability::{DayOverride, WindowSet};
use crate::domain::foundation::{DateKey, DomainError, ExpertId};

/// Persistence for per-date overrides of default working hours.
///
/// At most one override per (expert, date); upsert replaces.
#[async_trait]
pub trait DayOverrideRepository: Send + Sync {
    /// Stores or replaces the override for its (expert, date).
    async fn upsert(&self, day_override: &DayOverride) -> Result<(), DomainError>;

    /// Finds the override for an (expert, date), if any.
    async fn find(
        &self,
        expert_id: &ExpertId,
        date: DateKey,
    ) -> Result<Option<DayOverride>, DomainError>;

    /// Removes the override for an (expert, date). Idempotent.
    async fn delete(&self, expert_id: &ExpertId, date: DateKey) -> Result<(), DomainError>;

    /// Lists an expert's overrides, ascending by date.
    async fn find_by_expert(&self, expert_id: &ExpertId)
        -> Result<Vec<DayOverride>, DomainError>;
}

/// Persistence for explicit window sets.
///
/// One set per (expert, date); upsert replaces the whole set.
#[async_trait]
pub trait WindowSetRepository: Send + Sync {
    /// Stores or replaces the set for its (expert, date).
    async fn upsert(&self, set: &WindowSet) -> Result<(), DomainError>;

    /// Finds the set for an (expert, date), if any.
    async fn find(
        &self,
        expert_id: &ExpertId,
        date: DateKey,
    ) -> Result<Option<WindowSet>, DomainError>;

    /// Removes the set for an (expert, date). Idempotent.
    async fn delete(&self, expert_id: &ExpertId, date: DateKey) -> Result<(), DomainError>;
}
