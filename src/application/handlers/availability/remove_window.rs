//! RemoveWindowHandler - withdraws one declared window.

use std::sync::Arc;

use crate::domain::foundation::{DateKey, DomainError, ExpertId, MinuteOfDay};
use crate::ports::WindowSetRepository;

/// Command to remove the window starting at the given `HH:MM` time.
#[derive(Debug, Clone)]
pub struct RemoveWindowCommand {
    pub expert_id: ExpertId,
    pub date: DateKey,
    pub start: String,
}

/// Result of a window removal.
#[derive(Debug, Clone)]
pub struct RemoveWindowResult {
    /// Whether a window with that start existed.
    pub removed: bool,
}

/// Handler for removing explicit windows.
pub struct RemoveWindowHandler {
    window_sets: Arc<dyn WindowSetRepository>,
}

impl RemoveWindowHandler {
    pub fn new(window_sets: Arc<dyn WindowSetRepository>) -> Self {
        Self { window_sets }
    }

    pub async fn handle(
        &self,
        cmd: RemoveWindowCommand,
    ) -> Result<RemoveWindowResult, DomainError> {
        let start = MinuteOfDay::parse(&cmd.start)?;

        let Some(mut set) = self.window_sets.find(&cmd.expert_id, cmd.date).await? else {
            return Ok(RemoveWindowResult { removed: false });
        };

        let removed = set.remove_window(start.as_u16());
        if removed {
            // An empty set must not linger: it would read as "declared
            // but empty" where absence means "fall through".
            if set.is_empty() {
                self.window_sets.delete(&cmd.expert_id, cmd.date).await?;
            } else {
                self.window_sets.upsert(&set).await?;
            }
            tracing::debug!(
                expert_id = %cmd.expert_id,
                date = %cmd.date,
                start = %cmd.start,
                "availability window removed"
            );
        }

        Ok(RemoveWindowResult { removed })
    }
}
