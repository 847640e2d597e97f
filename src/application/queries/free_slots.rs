//! Free-slot listing for a booking calendar.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::availability::free_slots;
use crate::domain::foundation::{DateKey, DomainError, ExpertId, MinuteOfDay};
use crate::ports::{
    Clock, DayOverrideRepository, ExpertCatalog, SessionRepository, WindowSetRepository,
};

/// Query for an expert's free slots on one date.
#[derive(Debug, Clone)]
pub struct FreeSlotsQuery {
    pub expert_id: ExpertId,
    pub date: DateKey,
}

/// One free slot, with clock strings ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotView {
    pub start_min: u16,
    pub end_min: u16,
    pub start: String,
    pub end: String,
}

/// Handler for listing free slots.
///
/// Slots whose start has already passed are hidden; the booking
/// handler enforces the same rule, so the listing never shows a slot
/// booking would refuse.
pub struct FreeSlotsQueryHandler {
    experts: Arc<dyn ExpertCatalog>,
    sessions: Arc<dyn SessionRepository>,
    day_overrides: Arc<dyn DayOverrideRepository>,
    window_sets: Arc<dyn WindowSetRepository>,
    clock: Arc<dyn Clock>,
}

impl FreeSlotsQueryHandler {
    pub fn new(
        experts: Arc<dyn ExpertCatalog>,
        sessions: Arc<dyn SessionRepository>,
        day_overrides: Arc<dyn DayOverrideRepository>,
        window_sets: Arc<dyn WindowSetRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            experts,
            sessions,
            day_overrides,
            window_sets,
            clock,
        }
    }

    pub async fn handle(&self, query: FreeSlotsQuery) -> Result<Vec<SlotView>, DomainError> {
        let expert = self
            .experts
            .find_by_id(&query.expert_id)
            .await?
            .ok_or_else(|| DomainError::validation("expert_id", "Unknown expert"))?;

        let sessions = self
            .sessions
            .find_for_expert_on(&query.expert_id, query.date)
            .await?;
        let day_override = self.day_overrides.find(&query.expert_id, query.date).await?;
        let window_set = self.window_sets.find(&query.expert_id, query.date).await?;

        let now = self.clock.now();
        let slots = free_slots(
            &expert,
            query.date,
            &sessions,
            day_override.as_ref(),
            window_set.as_ref(),
        );

        let mut views = Vec::with_capacity(slots.len());
        for slot in slots {
            if !slot.start_instant(query.date).is_after(&now) {
                continue;
            }
            views.push(SlotView {
                start_min: slot.start_min(),
                end_min: slot.end_min(),
                start: MinuteOfDay::new(slot.start_min())?.to_string(),
                end: MinuteOfDay::new(slot.end_min())?.to_string(),
            });
        }

        Ok(views)
    }
}
