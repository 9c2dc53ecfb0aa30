//! In-memory implementation of ExecutionLogRepository

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use remind_core::entities::ExecutionLogEntry;
use remind_core::traits::{ExecutionLogRepository, RepoResult};

/// In-memory implementation of ExecutionLogRepository
#[derive(Default)]
pub struct InMemoryExecutionLogRepository {
    entries: RwLock<Vec<ExecutionLogEntry>>,
}

impl InMemoryExecutionLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExecutionLogRepository for InMemoryExecutionLogRepository {
    async fn append(&self, entry: &ExecutionLogEntry) -> RepoResult<()> {
        self.entries.write().push(entry.clone());
        Ok(())
    }

    async fn find_by_reminder(&self, reminder_id: Uuid) -> RepoResult<Vec<ExecutionLogEntry>> {
        let mut results: Vec<ExecutionLogEntry> = self
            .entries
            .read()
            .iter()
            .filter(|e| e.reminder_id == reminder_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| b.triggered_at.cmp(&a.triggered_at));
        Ok(results)
    }
}
