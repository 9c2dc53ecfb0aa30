//! PostgreSQL implementation of PollRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use remind_core::entities::Poll;
use remind_core::traits::{PollRepository, RepoResult};
use remind_core::value_objects::PollId;

use crate::models::PollModel;

use super::error::map_db_error;

const SELECT_COLUMNS: &str = "poll_id, question, options, creator_id, channel_id, \
     is_active, is_advanced, created_at, expires_at";

/// PostgreSQL implementation of PollRepository
#[derive(Clone)]
pub struct PgPollRepository {
    pool: PgPool,
}

impl PgPollRepository {
    /// Create a new PgPollRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PollRepository for PgPollRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &PollId) -> RepoResult<Option<Poll>> {
        let result = sqlx::query_as::<_, PollModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM polls WHERE poll_id = $1"
        ))
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Poll::from))
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<Poll>> {
        let results = sqlx::query_as::<_, PollModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM polls WHERE is_active = TRUE ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Poll::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_expired(&self, now: DateTime<Utc>) -> RepoResult<Vec<Poll>> {
        let results = sqlx::query_as::<_, PollModel>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM polls
            WHERE is_active = TRUE AND expires_at <= $1
            ORDER BY expires_at
            "#
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Poll::from).collect())
    }

    #[instrument(skip(self, poll))]
    async fn create(&self, poll: &Poll) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO polls
                (poll_id, question, options, creator_id, channel_id,
                 is_active, is_advanced, created_at, expires_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(poll.id.as_str())
        .bind(&poll.question)
        .bind(Json(&poll.options))
        .bind(poll.creator_id.into_inner())
        .bind(poll.channel_id.into_inner())
        .bind(poll.is_active)
        .bind(poll.is_advanced)
        .bind(poll.created_at)
        .bind(poll.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, poll))]
    async fn update(&self, poll: &Poll) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE polls SET is_active = $2, expires_at = $3 WHERE poll_id = $1
            "#,
        )
        .bind(poll.id.as_str())
        .bind(poll.is_active)
        .bind(poll.expires_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &PollId) -> RepoResult<()> {
        // Votes carry ON DELETE CASCADE; one statement removes both
        sqlx::query("DELETE FROM polls WHERE poll_id = $1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
