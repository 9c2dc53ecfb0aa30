//! Vote service - the reconciler merging two voting channels
//!
//! A poll is voteable via explicit vote commands (1-based option numbers)
//! and via emoji reactions on its message. Both paths funnel into the same
//! atomic replacement primitive: after any pass, the persisted rows for
//! (poll, user) exactly equal that pass's intended set.
//!
//! The reaction path recomputes from the user's full current reaction set
//! instead of applying single add/remove events, because increments are not
//! idempotent under duplicate or out-of-order events while full replacement
//! is.

use std::collections::BTreeSet;

use chrono::Utc;
use tracing::{info, instrument, warn};

use remind_core::entities::{Poll, MAX_REACTION_OPTIONS};
use remind_core::value_objects::{PollId, Snowflake};
use remind_core::DomainError;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Vote service
pub struct VoteService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> VoteService<'a> {
    /// Create a new VoteService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Command-based vote with 1-based option numbers.
    ///
    /// Returns the applied 0-based option indices.
    #[instrument(skip(self))]
    pub async fn vote(
        &self,
        poll_id: &PollId,
        user_id: Snowflake,
        option_numbers: &[usize],
    ) -> ServiceResult<Vec<usize>> {
        let poll = self.load_open_poll(poll_id).await?;

        // 1-based command input to deduplicated 0-based indices
        let mut indices = BTreeSet::new();
        for &number in option_numbers {
            if number == 0 {
                return Err(ServiceError::validation("option numbers are 1-based"));
            }
            let index = number - 1;
            if !poll.has_option(index) {
                return Err(DomainError::InvalidOptionIndex {
                    index,
                    option_count: poll.options.len(),
                }
                .into());
            }
            indices.insert(index);
        }
        if !poll.is_advanced && indices.len() > 1 {
            return Err(DomainError::SingleChoicePoll.into());
        }

        let intended: Vec<usize> = indices.into_iter().collect();

        // Prior set read first so dropped reactions can be cleaned up after
        let prior: Vec<usize> = self
            .ctx
            .vote_repo()
            .find_by_poll_and_user(poll_id, user_id)
            .await?
            .into_iter()
            .map(|v| v.option_index)
            .collect();

        self.ctx
            .vote_repo()
            .replace_for_user(poll_id, user_id, &intended)
            .await?;

        info!(
            poll_id = %poll_id,
            user_id = %user_id,
            selected = ?intended,
            "Vote recorded"
        );

        // Keep visible reactions from drifting away from the command state.
        // Advanced polls carry no option reactions.
        if !poll.is_advanced {
            for &dropped in prior.iter().filter(|i| !intended.contains(i)) {
                if let Err(e) = self
                    .ctx
                    .notifier()
                    .remove_reaction(poll.channel_id, user_id, dropped)
                    .await
                {
                    warn!(
                        poll_id = %poll_id,
                        user_id = %user_id,
                        option_index = dropped,
                        error = %e,
                        "Failed to remove stale reaction"
                    );
                }
            }
        }

        Ok(intended)
    }

    /// Reaction-based reconciliation from the user's full current reaction
    /// set (0-based option indices).
    ///
    /// Returns `None` when the poll is missing, closed, or expired (the
    /// event is ignored), otherwise the applied indices.
    #[instrument(skip(self))]
    pub async fn reconcile_from_reactions(
        &self,
        poll_id: &PollId,
        user_id: Snowflake,
        reaction_indices: &[usize],
    ) -> ServiceResult<Option<Vec<usize>>> {
        let poll = match self.load_open_poll(poll_id).await {
            Ok(poll) => poll,
            Err(e) if matches!(e.error_code(), "UNKNOWN_POLL" | "POLL_CLOSED" | "POLL_EXPIRED") => {
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        // Filter to the recognized option-emoji range and valid indices
        let mut indices: BTreeSet<usize> = reaction_indices
            .iter()
            .copied()
            .filter(|&i| i < MAX_REACTION_OPTIONS && poll.has_option(i))
            .collect();

        // A single-choice poll keeps only the lowest-indexed reaction
        if !poll.is_advanced && indices.len() > 1 {
            let first = *indices.iter().next().unwrap_or(&0);
            indices = BTreeSet::from([first]);
        }

        let intended: Vec<usize> = indices.into_iter().collect();
        self.ctx
            .vote_repo()
            .replace_for_user(poll_id, user_id, &intended)
            .await?;

        info!(
            poll_id = %poll_id,
            user_id = %user_id,
            selected = ?intended,
            "Votes reconciled from reactions"
        );

        Ok(Some(intended))
    }

    /// Load a poll that is active and not past its deadline, flipping it
    /// inactive first when it turns out freshly expired.
    async fn load_open_poll(&self, poll_id: &PollId) -> ServiceResult<Poll> {
        let mut poll = self
            .ctx
            .poll_repo()
            .find_by_id(poll_id)
            .await?
            .ok_or_else(|| DomainError::PollNotFound(poll_id.clone()))?;

        if !poll.is_active {
            return Err(DomainError::PollClosed(poll_id.clone()).into());
        }
        if poll.is_expired_at(Utc::now()) {
            poll.is_active = false;
            self.ctx.poll_repo().update(&poll).await?;
            return Err(DomainError::PollExpired(poll_id.clone()).into());
        }

        Ok(poll)
    }
}
