//! Poll service
//!
//! Poll lifecycle: creation with mode-dependent option caps, result tallies,
//! active listing (flipping freshly expired polls on the way), and deletion
//! with its vote cascade.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use tracing::{info, instrument};

use remind_core::entities::{Poll, MAX_COMMAND_OPTIONS, MAX_REACTION_OPTIONS, MIN_OPTIONS};
use remind_core::value_objects::{PollId, Snowflake};
use remind_core::DomainError;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Tally for one poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResults {
    pub poll: Poll,
    /// Vote count per option index
    pub counts: Vec<usize>,
    /// Number of distinct users who voted
    pub total_voters: usize,
}

/// Poll service
pub struct PollService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PollService<'a> {
    /// Create a new PollService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new poll with an optional duration
    #[instrument(skip(self, options))]
    pub async fn create_poll(
        &self,
        question: &str,
        options: Vec<String>,
        creator_id: Snowflake,
        channel_id: Snowflake,
        is_advanced: bool,
        duration_minutes: Option<i64>,
    ) -> ServiceResult<Poll> {
        if question.trim().is_empty() {
            return Err(ServiceError::validation("poll question must not be empty"));
        }
        if options.len() < MIN_OPTIONS {
            return Err(ServiceError::validation(format!(
                "poll needs at least {MIN_OPTIONS} options"
            )));
        }
        let cap = if is_advanced {
            MAX_COMMAND_OPTIONS
        } else {
            MAX_REACTION_OPTIONS
        };
        if options.len() > cap {
            return Err(ServiceError::validation(format!(
                "poll allows at most {cap} options"
            )));
        }
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(ServiceError::validation("poll options must not be empty"));
        }
        if let Some(minutes) = duration_minutes {
            if minutes <= 0 {
                return Err(ServiceError::validation("poll duration must be positive"));
            }
        }

        let expires_at = duration_minutes.map(|m| Utc::now() + Duration::minutes(m));
        let poll = Poll::new(
            question.to_string(),
            options,
            creator_id,
            channel_id,
            is_advanced,
            expires_at,
        );
        self.ctx.poll_repo().create(&poll).await?;

        info!(
            poll_id = %poll.id,
            option_count = poll.options.len(),
            is_advanced,
            "Poll created"
        );

        Ok(poll)
    }

    /// Get a poll's current tally
    #[instrument(skip(self))]
    pub async fn get_results(&self, poll_id: &PollId) -> ServiceResult<PollResults> {
        let poll = self
            .ctx
            .poll_repo()
            .find_by_id(poll_id)
            .await?
            .ok_or_else(|| DomainError::PollNotFound(poll_id.clone()))?;

        let votes = self.ctx.vote_repo().find_by_poll(poll_id).await?;

        let mut counts = vec![0usize; poll.options.len()];
        let mut voters = HashSet::new();
        for vote in &votes {
            if let Some(slot) = counts.get_mut(vote.option_index) {
                *slot += 1;
            }
            voters.insert(vote.user_id);
        }

        Ok(PollResults {
            poll,
            counts,
            total_voters: voters.len(),
        })
    }

    /// List active polls, deactivating any that turn out freshly expired
    #[instrument(skip(self))]
    pub async fn list_active(&self) -> ServiceResult<Vec<Poll>> {
        let now = Utc::now();
        let mut active = Vec::new();
        for mut poll in self.ctx.poll_repo().find_active().await? {
            if poll.is_expired_at(now) {
                poll.is_active = false;
                self.ctx.poll_repo().update(&poll).await?;
            } else {
                active.push(poll);
            }
        }
        Ok(active)
    }

    /// Delete a poll and its votes; only the creator (or an admin) may
    #[instrument(skip(self))]
    pub async fn delete_poll(
        &self,
        poll_id: &PollId,
        requester_id: Snowflake,
        is_admin: bool,
    ) -> ServiceResult<()> {
        let poll = self
            .ctx
            .poll_repo()
            .find_by_id(poll_id)
            .await?
            .ok_or_else(|| DomainError::PollNotFound(poll_id.clone()))?;

        if poll.creator_id != requester_id && !is_admin {
            return Err(DomainError::NotPollCreator.into());
        }

        self.ctx.vote_repo().delete_by_poll(poll_id).await?;
        self.ctx.poll_repo().delete(poll_id).await?;

        info!(poll_id = %poll_id, "Poll deleted");

        Ok(())
    }
}
