//! In-memory implementation of ReminderRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use uuid::Uuid;

use remind_core::entities::Reminder;
use remind_core::traits::{ReminderRepository, RepoResult};
use remind_core::value_objects::Snowflake;
use remind_core::DomainError;

/// In-memory implementation of ReminderRepository
#[derive(Default)]
pub struct InMemoryReminderRepository {
    reminders: RwLock<HashMap<Uuid, Reminder>>,
}

impl InMemoryReminderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReminderRepository for InMemoryReminderRepository {
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Reminder>> {
        Ok(self.reminders.read().get(&id).cloned())
    }

    async fn list(
        &self,
        creator_id: Option<Snowflake>,
        is_active: Option<bool>,
    ) -> RepoResult<Vec<Reminder>> {
        let mut results: Vec<Reminder> = self
            .reminders
            .read()
            .values()
            .filter(|r| creator_id.is_none_or(|c| r.creator_id == c))
            .filter(|r| is_active.is_none_or(|a| r.is_active == a))
            .cloned()
            .collect();
        results.sort_by_key(|r| r.created_at);
        Ok(results)
    }

    async fn find_schedulable(&self, now: DateTime<Utc>) -> RepoResult<Vec<Reminder>> {
        let mut results: Vec<Reminder> = self
            .reminders
            .read()
            .values()
            .filter(|r| r.is_active && r.next_trigger.is_some_and(|t| t > now))
            .cloned()
            .collect();
        results.sort_by_key(|r| r.next_trigger);
        Ok(results)
    }

    async fn find_missed(&self, now: DateTime<Utc>, grace: Duration) -> RepoResult<Vec<Reminder>> {
        let cutoff = now - grace;
        let mut results: Vec<Reminder> = self
            .reminders
            .read()
            .values()
            .filter(|r| r.is_active && r.next_trigger.is_some_and(|t| t <= now && t > cutoff))
            .cloned()
            .collect();
        results.sort_by_key(|r| r.next_trigger);
        Ok(results)
    }

    async fn create(&self, reminder: &Reminder) -> RepoResult<()> {
        self.reminders
            .write()
            .insert(reminder.id, reminder.clone());
        Ok(())
    }

    async fn update(&self, reminder: &Reminder) -> RepoResult<()> {
        let mut reminders = self.reminders.write();
        if !reminders.contains_key(&reminder.id) {
            return Err(DomainError::ReminderNotFound(reminder.id));
        }
        reminders.insert(reminder.id, reminder.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use remind_core::entities::{Target, Trigger};

    fn reminder_at(next_trigger: Option<DateTime<Utc>>) -> Reminder {
        let mut r = Reminder::new(
            Uuid::new_v4(),
            Target::Custom,
            Snowflake::new(1),
            Trigger::Interval {
                minutes: 5,
                max_occurrences: None,
            },
            Snowflake::new(2),
        );
        r.next_trigger = next_trigger;
        r
    }

    #[tokio::test]
    async fn test_find_schedulable_excludes_past_and_unscheduled() {
        let repo = InMemoryReminderRepository::new();
        let now = Utc::now();

        repo.create(&reminder_at(Some(now + Duration::minutes(5))))
            .await
            .unwrap();
        repo.create(&reminder_at(Some(now - Duration::minutes(5))))
            .await
            .unwrap();
        repo.create(&reminder_at(None)).await.unwrap();

        let due = repo.find_schedulable(now).await.unwrap();
        assert_eq!(due.len(), 1);
    }

    #[tokio::test]
    async fn test_find_missed_honors_grace_window() {
        let repo = InMemoryReminderRepository::new();
        let now = Utc::now();

        let inside = reminder_at(Some(now - Duration::minutes(3)));
        let outside = reminder_at(Some(now - Duration::minutes(10)));
        repo.create(&inside).await.unwrap();
        repo.create(&outside).await.unwrap();

        let missed = repo.find_missed(now, Duration::minutes(5)).await.unwrap();
        assert_eq!(missed.len(), 1);
        assert_eq!(missed[0].id, inside.id);
    }

    #[tokio::test]
    async fn test_update_unknown_reminder_fails() {
        let repo = InMemoryReminderRepository::new();
        let r = reminder_at(None);
        let err = repo.update(&r).await.unwrap_err();
        assert!(matches!(err, DomainError::ReminderNotFound(_)));
    }
}
