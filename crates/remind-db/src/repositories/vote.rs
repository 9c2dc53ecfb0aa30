//! PostgreSQL implementation of VoteRepository
//!
//! The replacement path is the consistency-critical one: delete and insert
//! run inside a single transaction so a concurrent tally reader never sees
//! a mix of stale and fresh rows.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tracing::instrument;

use remind_core::entities::Vote;
use remind_core::traits::{RepoResult, VoteRepository};
use remind_core::value_objects::{PollId, Snowflake};

use crate::models::VoteModel;

use super::error::map_db_error;

/// PostgreSQL implementation of VoteRepository
#[derive(Clone)]
pub struct PgVoteRepository {
    pool: PgPool,
}

impl PgVoteRepository {
    /// Create a new PgVoteRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoteRepository for PgVoteRepository {
    #[instrument(skip(self))]
    async fn find_by_poll(&self, poll_id: &PollId) -> RepoResult<Vec<Vote>> {
        let results = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT poll_id, user_id, option_index, voted_at
            FROM votes
            WHERE poll_id = $1
            ORDER BY voted_at
            "#,
        )
        .bind(poll_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Vote::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_poll_and_user(
        &self,
        poll_id: &PollId,
        user_id: Snowflake,
    ) -> RepoResult<Vec<Vote>> {
        let results = sqlx::query_as::<_, VoteModel>(
            r#"
            SELECT poll_id, user_id, option_index, voted_at
            FROM votes
            WHERE poll_id = $1 AND user_id = $2
            ORDER BY option_index
            "#,
        )
        .bind(poll_id.as_str())
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Vote::from).collect())
    }

    #[instrument(skip(self))]
    async fn replace_for_user(
        &self,
        poll_id: &PollId,
        user_id: Snowflake,
        option_indices: &[usize],
    ) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM votes WHERE poll_id = $1 AND user_id = $2")
            .bind(poll_id.as_str())
            .bind(user_id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let voted_at = Utc::now();
        for &index in option_indices {
            sqlx::query(
                r#"
                INSERT INTO votes (poll_id, user_id, option_index, voted_at)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(poll_id.as_str())
            .bind(user_id.into_inner())
            .bind(index as i32)
            .bind(voted_at)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_poll(&self, poll_id: &PollId) -> RepoResult<()> {
        sqlx::query("DELETE FROM votes WHERE poll_id = $1")
            .bind(poll_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
