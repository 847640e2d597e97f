//! SetDayOverrideHandler - replaces the default hours for one date.

use std::sync::Arc;

use crate::domain::availability::DayOverride;
use crate::domain::foundation::{DateKey, DomainError, ExpertId, MinuteOfDay};
use crate::ports::{DayOverrideRepository, ExpertCatalog};

/// Command to override one date. `hours` as (`HH:MM`, `HH:MM`) marks a
/// working day with custom hours; `None` marks the date off.
#[derive(Debug, Clone)]
pub struct SetDayOverrideCommand {
    pub expert_id: ExpertId,
    pub date: DateKey,
    pub hours: Option<(String, String)>,
}

/// Result carrying the stored override.
#[derive(Debug, Clone)]
pub struct SetDayOverrideResult {
    pub day_override: DayOverride,
}

/// Handler for setting day overrides. Last write per (expert, date)
/// wins.
pub struct SetDayOverrideHandler {
    experts: Arc<dyn ExpertCatalog>,
    day_overrides: Arc<dyn DayOverrideRepository>,
}

impl SetDayOverrideHandler {
    pub fn new(
        experts: Arc<dyn ExpertCatalog>,
        day_overrides: Arc<dyn DayOverrideRepository>,
    ) -> Self {
        Self {
            experts,
            day_overrides,
        }
    }

    pub async fn handle(
        &self,
        cmd: SetDayOverrideCommand,
    ) -> Result<SetDayOverrideResult, DomainError> {
        self.experts
            .find_by_id(&cmd.expert_id)
            .await?
            .ok_or_else(|| DomainError::validation("expert_id", "Unknown expert"))?;

        let day_override = match &cmd.hours {
            Some((start, end)) => {
                let start = MinuteOfDay::parse(start)?;
                let end = MinuteOfDay::parse(end)?;
                DayOverride::working(cmd.expert_id, cmd.date, start.as_u16(), end.as_u16())?
            }
            None => DayOverride::day_off(cmd.expert_id, cmd.date),
        };

        self.day_overrides.upsert(&day_override).await?;

        tracing::debug!(
            expert_id = %cmd.expert_id,
            date = %cmd.date,
            workday = day_override.is_workday(),
            "day override set"
        );

        Ok(SetDayOverrideResult { day_override })
    }
}
