//! In-memory implementation of VoteRepository

use async_trait::async_trait;
use parking_lot::RwLock;

use remind_core::entities::Vote;
use remind_core::traits::{RepoResult, VoteRepository};
use remind_core::value_objects::{PollId, Snowflake};

/// In-memory implementation of VoteRepository
///
/// A single lock around the whole vote set makes replace_for_user atomic
/// without needing transactions.
#[derive(Default)]
pub struct InMemoryVoteRepository {
    votes: RwLock<Vec<Vote>>,
}

impl InMemoryVoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoteRepository for InMemoryVoteRepository {
    async fn find_by_poll(&self, poll_id: &PollId) -> RepoResult<Vec<Vote>> {
        let mut results: Vec<Vote> = self
            .votes
            .read()
            .iter()
            .filter(|v| &v.poll_id == poll_id)
            .cloned()
            .collect();
        results.sort_by_key(|v| v.voted_at);
        Ok(results)
    }

    async fn find_by_poll_and_user(
        &self,
        poll_id: &PollId,
        user_id: Snowflake,
    ) -> RepoResult<Vec<Vote>> {
        let mut results: Vec<Vote> = self
            .votes
            .read()
            .iter()
            .filter(|v| &v.poll_id == poll_id && v.user_id == user_id)
            .cloned()
            .collect();
        results.sort_by_key(|v| v.option_index);
        Ok(results)
    }

    async fn replace_for_user(
        &self,
        poll_id: &PollId,
        user_id: Snowflake,
        option_indices: &[usize],
    ) -> RepoResult<()> {
        let mut votes = self.votes.write();
        votes.retain(|v| !(&v.poll_id == poll_id && v.user_id == user_id));
        for &index in option_indices {
            votes.push(Vote::new(poll_id.clone(), user_id, index));
        }
        Ok(())
    }

    async fn delete_by_poll(&self, poll_id: &PollId) -> RepoResult<()> {
        self.votes.write().retain(|v| &v.poll_id != poll_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replace_swaps_entire_vote_set() {
        let repo = InMemoryVoteRepository::new();
        let poll_id = PollId::generate();
        let user = Snowflake::new(7);

        repo.replace_for_user(&poll_id, user, &[0, 2]).await.unwrap();
        repo.replace_for_user(&poll_id, user, &[1]).await.unwrap();

        let votes = repo.find_by_poll_and_user(&poll_id, user).await.unwrap();
        assert_eq!(votes.len(), 1);
        assert_eq!(votes[0].option_index, 1);
    }

    #[tokio::test]
    async fn test_replace_with_empty_set_retracts() {
        let repo = InMemoryVoteRepository::new();
        let poll_id = PollId::generate();
        let user = Snowflake::new(7);

        repo.replace_for_user(&poll_id, user, &[0]).await.unwrap();
        repo.replace_for_user(&poll_id, user, &[]).await.unwrap();

        assert!(repo
            .find_by_poll_and_user(&poll_id, user)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_replace_leaves_other_users_alone() {
        let repo = InMemoryVoteRepository::new();
        let poll_id = PollId::generate();

        repo.replace_for_user(&poll_id, Snowflake::new(1), &[0])
            .await
            .unwrap();
        repo.replace_for_user(&poll_id, Snowflake::new(2), &[1])
            .await
            .unwrap();
        repo.replace_for_user(&poll_id, Snowflake::new(1), &[2])
            .await
            .unwrap();

        let all = repo.find_by_poll(&poll_id).await.unwrap();
        assert_eq!(all.len(), 2);
        let other: Vec<_> = all.iter().filter(|v| v.user_id == Snowflake::new(2)).collect();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].option_index, 1);
    }

    #[tokio::test]
    async fn test_delete_by_poll_scoped() {
        let repo = InMemoryVoteRepository::new();
        let a = PollId::generate();
        let b = PollId::generate();

        repo.replace_for_user(&a, Snowflake::new(1), &[0]).await.unwrap();
        repo.replace_for_user(&b, Snowflake::new(1), &[0]).await.unwrap();

        repo.delete_by_poll(&a).await.unwrap();
        assert!(repo.find_by_poll(&a).await.unwrap().is_empty());
        assert_eq!(repo.find_by_poll(&b).await.unwrap().len(), 1);
    }
}
