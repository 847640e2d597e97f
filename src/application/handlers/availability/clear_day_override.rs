//! ClearDayOverrideHandler - restores the default pattern for a date.

use std::sync::Arc;

use crate::domain::foundation::{DateKey, DomainError, ExpertId};
use crate::ports::DayOverrideRepository;

/// Command to drop the override for an (expert, date). Idempotent.
#[derive(Debug, Clone)]
pub struct ClearDayOverrideCommand {
    pub expert_id: ExpertId,
    pub date: DateKey,
}

/// Handler for clearing day overrides.
pub struct ClearDayOverrideHandler {
    day_overrides: Arc<dyn DayOverrideRepository>,
}

impl ClearDayOverrideHandler {
    pub fn new(day_overrides: Arc<dyn DayOverrideRepository>) -> Self {
        Self { day_overrides }
    }

    pub async fn handle(&self, cmd: ClearDayOverrideCommand) -> Result<(), DomainError> {
        self.day_overrides.delete(&cmd.expert_id, cmd.date).await?;
        tracing::debug!(
            expert_id = %cmd.expert_id,
            date = %cmd.date,
            "day override cleared"
        );
        Ok(())
    }
}
