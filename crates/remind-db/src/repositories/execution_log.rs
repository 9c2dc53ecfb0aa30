//! PostgreSQL implementation of ExecutionLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use remind_core::entities::ExecutionLogEntry;
use remind_core::traits::{ExecutionLogRepository, RepoResult};

use crate::models::ExecutionLogModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ExecutionLogRepository
#[derive(Clone)]
pub struct PgExecutionLogRepository {
    pool: PgPool,
}

impl PgExecutionLogRepository {
    /// Create a new PgExecutionLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExecutionLogRepository for PgExecutionLogRepository {
    #[instrument(skip(self, entry))]
    async fn append(&self, entry: &ExecutionLogEntry) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO execution_logs
                (id, reminder_id, triggered_at, status, error_message, rendered_message)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id)
        .bind(entry.reminder_id)
        .bind(entry.triggered_at)
        .bind(entry.status.as_str())
        .bind(&entry.error_message)
        .bind(&entry.rendered_message)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_reminder(&self, reminder_id: Uuid) -> RepoResult<Vec<ExecutionLogEntry>> {
        let results = sqlx::query_as::<_, ExecutionLogModel>(
            r#"
            SELECT id, reminder_id, triggered_at, status, error_message, rendered_message
            FROM execution_logs
            WHERE reminder_id = $1
            ORDER BY triggered_at DESC
            "#,
        )
        .bind(reminder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(ExecutionLogEntry::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgExecutionLogRepository>();
    }
}
