//! PostgreSQL implementation of ReminderRepository

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use remind_core::entities::Reminder;
use remind_core::traits::{ReminderRepository, RepoResult};
use remind_core::value_objects::Snowflake;

use crate::mappers::{target_columns, trigger_columns};
use crate::models::ReminderModel;

use super::error::map_db_error;

const SELECT_COLUMNS: &str = "id, template_id, target_kind, target_id, channel_id, \
     trigger_kind, trigger_time, time_before_minutes, interval_minutes, is_recurring, \
     max_occurrences, occurrence_count, next_trigger, last_triggered, is_active, \
     custom_data, creator_id, created_at";

/// PostgreSQL implementation of ReminderRepository
#[derive(Clone)]
pub struct PgReminderRepository {
    pool: PgPool,
}

impl PgReminderRepository {
    /// Create a new PgReminderRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReminderRepository for PgReminderRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Reminder>> {
        let result = sqlx::query_as::<_, ReminderModel>(&format!(
            "SELECT {SELECT_COLUMNS} FROM reminders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reminder::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        creator_id: Option<Snowflake>,
        is_active: Option<bool>,
    ) -> RepoResult<Vec<Reminder>> {
        // Optional filters collapse to always-true clauses when unset
        let results = sqlx::query_as::<_, ReminderModel>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM reminders
            WHERE ($1::bigint IS NULL OR creator_id = $1)
              AND ($2::boolean IS NULL OR is_active = $2)
            ORDER BY created_at
            "#
        ))
        .bind(creator_id.map(Snowflake::into_inner))
        .bind(is_active)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reminder::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_schedulable(&self, now: DateTime<Utc>) -> RepoResult<Vec<Reminder>> {
        let results = sqlx::query_as::<_, ReminderModel>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM reminders
            WHERE is_active = TRUE AND next_trigger > $1
            ORDER BY next_trigger
            "#
        ))
        .bind(now)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reminder::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn find_missed(&self, now: DateTime<Utc>, grace: Duration) -> RepoResult<Vec<Reminder>> {
        let results = sqlx::query_as::<_, ReminderModel>(&format!(
            r#"
            SELECT {SELECT_COLUMNS} FROM reminders
            WHERE is_active = TRUE AND next_trigger <= $1 AND next_trigger > $2
            ORDER BY next_trigger
            "#
        ))
        .bind(now)
        .bind(now - grace)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Reminder::try_from).collect()
    }

    #[instrument(skip(self, reminder))]
    async fn create(&self, reminder: &Reminder) -> RepoResult<()> {
        let (target_kind, target_id) = target_columns(&reminder.target);
        let (trigger_kind, trigger_time, time_before, interval, max_occurrences) =
            trigger_columns(&reminder.trigger);

        sqlx::query(
            r#"
            INSERT INTO reminders
                (id, template_id, target_kind, target_id, channel_id,
                 trigger_kind, trigger_time, time_before_minutes, interval_minutes,
                 is_recurring, max_occurrences, occurrence_count, next_trigger,
                 last_triggered, is_active, custom_data, creator_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18)
            "#,
        )
        .bind(reminder.id)
        .bind(reminder.template_id)
        .bind(target_kind)
        .bind(target_id)
        .bind(reminder.channel_id.into_inner())
        .bind(trigger_kind)
        .bind(trigger_time)
        .bind(time_before)
        .bind(interval)
        .bind(reminder.is_recurring())
        .bind(max_occurrences)
        .bind(reminder.occurrence_count)
        .bind(reminder.next_trigger)
        .bind(reminder.last_triggered)
        .bind(reminder.is_active)
        .bind(Json(&reminder.custom_data))
        .bind(reminder.creator_id.into_inner())
        .bind(reminder.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self, reminder))]
    async fn update(&self, reminder: &Reminder) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET occurrence_count = $2, next_trigger = $3, last_triggered = $4, is_active = $5
            WHERE id = $1
            "#,
        )
        .bind(reminder.id)
        .bind(reminder.occurrence_count)
        .bind(reminder.next_trigger)
        .bind(reminder.last_triggered)
        .bind(reminder.is_active)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgReminderRepository>();
    }
}
