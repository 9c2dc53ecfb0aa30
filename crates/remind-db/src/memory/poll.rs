//! In-memory implementation of PollRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use remind_core::entities::Poll;
use remind_core::traits::{PollRepository, RepoResult};
use remind_core::value_objects::PollId;
use remind_core::DomainError;

/// In-memory implementation of PollRepository
#[derive(Default)]
pub struct InMemoryPollRepository {
    polls: RwLock<HashMap<PollId, Poll>>,
}

impl InMemoryPollRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PollRepository for InMemoryPollRepository {
    async fn find_by_id(&self, id: &PollId) -> RepoResult<Option<Poll>> {
        Ok(self.polls.read().get(id).cloned())
    }

    async fn find_active(&self) -> RepoResult<Vec<Poll>> {
        let mut results: Vec<Poll> = self
            .polls
            .read()
            .values()
            .filter(|p| p.is_active)
            .cloned()
            .collect();
        results.sort_by_key(|p| p.created_at);
        Ok(results)
    }

    async fn find_expired(&self, now: DateTime<Utc>) -> RepoResult<Vec<Poll>> {
        let mut results: Vec<Poll> = self
            .polls
            .read()
            .values()
            .filter(|p| p.is_active && p.expires_at.is_some_and(|e| e <= now))
            .cloned()
            .collect();
        results.sort_by_key(|p| p.expires_at);
        Ok(results)
    }

    async fn create(&self, poll: &Poll) -> RepoResult<()> {
        self.polls.write().insert(poll.id.clone(), poll.clone());
        Ok(())
    }

    async fn update(&self, poll: &Poll) -> RepoResult<()> {
        let mut polls = self.polls.write();
        if !polls.contains_key(&poll.id) {
            return Err(DomainError::PollNotFound(poll.id.clone()));
        }
        polls.insert(poll.id.clone(), poll.clone());
        Ok(())
    }

    async fn delete(&self, id: &PollId) -> RepoResult<()> {
        self.polls.write().remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use remind_core::value_objects::Snowflake;

    fn poll(expires_at: Option<DateTime<Utc>>) -> Poll {
        Poll::new(
            "q".to_string(),
            vec!["a".to_string(), "b".to_string()],
            Snowflake::new(1),
            Snowflake::new(2),
            false,
            expires_at,
        )
    }

    #[tokio::test]
    async fn test_find_expired_skips_open_and_inactive() {
        let repo = InMemoryPollRepository::new();
        let now = Utc::now();

        let expired = poll(Some(now - Duration::minutes(1)));
        let open = poll(Some(now + Duration::minutes(10)));
        let mut closed = poll(Some(now - Duration::minutes(5)));
        closed.is_active = false;

        repo.create(&expired).await.unwrap();
        repo.create(&open).await.unwrap();
        repo.create(&closed).await.unwrap();

        let due = repo.find_expired(now).await.unwrap();
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].id, expired.id);
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemoryPollRepository::new();
        let p = poll(None);
        repo.create(&p).await.unwrap();
        repo.delete(&p.id).await.unwrap();
        repo.delete(&p.id).await.unwrap();
        assert!(repo.find_by_id(&p.id).await.unwrap().is_none());
    }
}
