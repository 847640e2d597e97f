//! ClearWindowsHandler - drops every declared window for a date.

use std::sync::Arc;

use crate::domain::foundation::{DateKey, DomainError, ExpertId};
use crate::ports::WindowSetRepository;

/// Command to clear all windows for an (expert, date). Idempotent.
#[derive(Debug, Clone)]
pub struct ClearWindowsCommand {
    pub expert_id: ExpertId,
    pub date: DateKey,
}

/// Handler for clearing window sets.
pub struct ClearWindowsHandler {
    window_sets: Arc<dyn WindowSetRepository>,
}

impl ClearWindowsHandler {
    pub fn new(window_sets: Arc<dyn WindowSetRepository>) -> Self {
        Self { window_sets }
    }

    pub async fn handle(&self, cmd: ClearWindowsCommand) -> Result<(), DomainError> {
        self.window_sets.delete(&cmd.expert_id, cmd.date).await?;
        tracing::debug!(
            expert_id = %cmd.expert_id,
            date = %cmd.date,
            "availability windows cleared"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryWindowSetRepository;
    use crate::domain::availability::{TimeWindow, WindowSet};

    fn monday() -> DateKey {
        DateKey::from_ymd(2025, 3, 10).unwrap()
    }

    #[tokio::test]
    async fn clears_existing_set_and_tolerates_absence() {
        let repo = Arc::new(InMemoryWindowSetRepository::new());
        let expert_id = ExpertId::new();
        let mut set = WindowSet::new(expert_id, monday());
        set.add_window(TimeWindow::new(540, 600).unwrap(), &[]).unwrap();
        repo.upsert(&set).await.unwrap();

        let handler = ClearWindowsHandler::new(repo.clone());
        let cmd = ClearWindowsCommand {
            expert_id,
            date: monday(),
        };
        handler.handle(cmd.clone()).await.unwrap();
        assert!(repo.find(&expert_id, monday()).await.unwrap().is_none());

        // Second clear is a no-op, not an error.
        handler.handle(cmd).await.unwrap();
    }
}
