//! AddWindowHandler - declares an explicit bookable window for a date.

use std::sync::Arc;

use crate::domain::availability::{TimeWindow, WindowSet};
use crate::domain::foundation::{DateKey, DomainError, ExpertId, MinuteOfDay};
use crate::ports::{ExpertCatalog, SessionRepository, WindowSetRepository};

/// Command to add a window. Times arrive as `HH:MM` strings.
#[derive(Debug, Clone)]
pub struct AddWindowCommand {
    pub expert_id: ExpertId,
    pub date: DateKey,
    pub start: String,
    pub end: String,
}

/// Result carrying the updated window set.
#[derive(Debug, Clone)]
pub struct AddWindowResult {
    pub window_set: WindowSet,
}

/// Handler for adding explicit windows.
pub struct AddWindowHandler {
    experts: Arc<dyn ExpertCatalog>,
    sessions: Arc<dyn SessionRepository>,
    window_sets: Arc<dyn WindowSetRepository>,
}

impl AddWindowHandler {
    pub fn new(
        experts: Arc<dyn ExpertCatalog>,
        sessions: Arc<dyn SessionRepository>,
        window_sets: Arc<dyn WindowSetRepository>,
    ) -> Self {
        Self {
            experts,
            sessions,
            window_sets,
        }
    }

    pub async fn handle(&self, cmd: AddWindowCommand) -> Result<AddWindowResult, DomainError> {
        self.experts
            .find_by_id(&cmd.expert_id)
            .await?
            .ok_or_else(|| DomainError::validation("expert_id", "Unknown expert"))?;

        let start = MinuteOfDay::parse(&cmd.start)?;
        let end = MinuteOfDay::parse(&cmd.end)?;
        let window = TimeWindow::new(start.as_u16(), end.as_u16())?;

        let mut set = self
            .window_sets
            .find(&cmd.expert_id, cmd.date)
            .await?
            .unwrap_or_else(|| WindowSet::new(cmd.expert_id, cmd.date));

        let booked: Vec<(u16, u16)> = self
            .sessions
            .find_for_expert_on(&cmd.expert_id, cmd.date)
            .await?
            .iter()
            .filter(|s| !s.is_cancelled())
            .map(|s| (s.start_min(), s.end_min()))
            .collect();

        set.add_window(window, &booked)?;
        self.window_sets.upsert(&set).await?;

        tracing::debug!(
            expert_id = %cmd.expert_id,
            date = %cmd.date,
            start = %cmd.start,
            end = %cmd.end,
            "availability window added"
        );

        Ok(AddWindowResult { window_set: set })
    }
}
