//! BookSlotsHandler - redeems purchased hours as 30-minute sessions.

use std::sync::Arc;

use crate::application::LockRegistry;
use crate::domain::availability::free_slots;
use crate::domain::booking::Session;
use crate::domain::foundation::{
    DateKey, DomainError, ErrorCode, ExpertId, PurchaseId, SessionId, UserId, SLOT_MIN,
};
use crate::ports::{
    Clock, DayOverrideRepository, ExpertCatalog, PurchaseRepository, SessionRepository,
    WindowSetRepository,
};

/// Command to book one or more free slots on a single date.
#[derive(Debug, Clone)]
pub struct BookSlotsCommand {
    pub user_id: UserId,
    pub purchase_id: PurchaseId,
    pub date: DateKey,
    /// Requested slot starts, minute of day.
    pub start_mins: Vec<u16>,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct BookSlotsResult {
    pub sessions: Vec<Session>,
    pub hours_deducted: f64,
    pub hours_remaining: f64,
}

/// Handler for booking slots against a purchase.
///
/// Availability is recomputed under a per-(expert, date) lock between
/// the caller picking slots and the booking landing, so two clients
/// racing for the same slot cannot both win.
pub struct BookSlotsHandler {
    experts: Arc<dyn ExpertCatalog>,
    purchases: Arc<dyn PurchaseRepository>,
    sessions: Arc<dyn SessionRepository>,
    day_overrides: Arc<dyn DayOverrideRepository>,
    window_sets: Arc<dyn WindowSetRepository>,
    clock: Arc<dyn Clock>,
    locks: LockRegistry<(ExpertId, DateKey)>,
}

impl BookSlotsHandler {
    pub fn new(
        experts: Arc<dyn ExpertCatalog>,
        purchases: Arc<dyn PurchaseRepository>,
        sessions: Arc<dyn SessionRepository>,
        day_overrides: Arc<dyn DayOverrideRepository>,
        window_sets: Arc<dyn WindowSetRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            experts,
            purchases,
            sessions,
            day_overrides,
            window_sets,
            clock,
            locks: LockRegistry::new(),
        }
    }

    pub async fn handle(&self, cmd: BookSlotsCommand) -> Result<BookSlotsResult, DomainError> {
        if cmd.start_mins.is_empty() {
            return Err(DomainError::validation(
                "start_mins",
                "Select at least one slot",
            ));
        }

        let mut purchase = self
            .purchases
            .find_by_id(&cmd.purchase_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(ErrorCode::PurchaseNotFound, "Purchase not found")
            })?;
        purchase.authorize(&cmd.user_id)?;

        let expert = self
            .experts
            .find_by_id(purchase.expert_id())
            .await?
            .ok_or_else(|| DomainError::validation("expert_id", "Unknown expert"))?;

        let _guard = self.locks.acquire((*expert.id(), cmd.date)).await;

        // Revalidate against live state: another booking may have landed
        // since the caller saw the slot list.
        let existing = self.sessions.find_for_expert_on(expert.id(), cmd.date).await?;
        let day_override = self.day_overrides.find(expert.id(), cmd.date).await?;
        let window_set = self.window_sets.find(expert.id(), cmd.date).await?;
        let available = free_slots(
            &expert,
            cmd.date,
            &existing,
            day_override.as_ref(),
            window_set.as_ref(),
        );

        let now = self.clock.now();
        let mut requested = cmd.start_mins.clone();
        requested.sort_unstable();
        requested.dedup();

        // Keep the requested slots that are still free and still in the
        // future; stale picks drop out rather than failing the batch.
        let confirmed: Vec<_> = available
            .into_iter()
            .filter(|slot| requested.contains(&slot.start_min()))
            .filter(|slot| slot.start_instant(cmd.date).is_after(&now))
            .collect();

        if confirmed.is_empty() {
            return Err(DomainError::new(
                ErrorCode::NoAvailableSlots,
                "Selected slots are no longer available",
            )
            .with_detail("date", cmd.date.to_string()));
        }

        purchase.deduct(confirmed.len() as u32 * SLOT_MIN as u32)?;

        let booked: Vec<Session> = confirmed
            .into_iter()
            .map(|slot| {
                Session::book(
                    SessionId::new(),
                    cmd.user_id.clone(),
                    *expert.id(),
                    cmd.purchase_id,
                    cmd.date,
                    slot,
                    now,
                )
            })
            .collect();

        self.sessions.save_all(&booked).await?;
        self.purchases.update(&purchase).await?;

        tracing::debug!(
            purchase_id = %cmd.purchase_id,
            expert_id = %expert.id(),
            date = %cmd.date,
            booked = booked.len(),
            "slots booked"
        );

        Ok(BookSlotsResult {
            hours_deducted: booked.len() as f64 * 0.5,
            hours_remaining: purchase.hours_remaining(),
            sessions: booked,
        })
    }
}
