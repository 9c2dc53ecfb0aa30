//! Bundled notification sinks
//!
//! Concrete chat-platform delivery lives outside this workspace; these two
//! implementations cover everything the engine itself needs: a tracing-only
//! sink for embedded/headless runs and a recording sink for tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

use remind_core::traits::{DeliveryError, Notifier};
use remind_core::value_objects::Snowflake;

/// Notifier that logs dispatches without delivering anything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(
        &self,
        channel_id: Snowflake,
        message: &str,
        ping_role_ids: &[Snowflake],
        ping_user_ids: &[Snowflake],
    ) -> Result<(), DeliveryError> {
        info!(
            channel_id = %channel_id,
            ping_roles = ping_role_ids.len(),
            ping_users = ping_user_ids.len(),
            message,
            "Notification dispatched (null sink)"
        );
        Ok(())
    }

    async fn remove_reaction(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        option_index: usize,
    ) -> Result<(), DeliveryError> {
        info!(
            channel_id = %channel_id,
            user_id = %user_id,
            option_index,
            "Reaction removal requested (null sink)"
        );
        Ok(())
    }
}

/// One message captured by [`RecordingNotifier`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMessage {
    pub channel_id: Snowflake,
    pub message: String,
    pub ping_role_ids: Vec<Snowflake>,
    pub ping_user_ids: Vec<Snowflake>,
}

/// Notifier that records every call, optionally failing sends on demand
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<SentMessage>>,
    removed_reactions: Mutex<Vec<(Snowflake, Snowflake, usize)>>,
    fail_sends: Mutex<bool>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `send` calls fail (until disabled again)
    pub fn set_fail_sends(&self, fail: bool) {
        *self.fail_sends.lock() = fail;
    }

    /// Messages sent so far
    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().clone()
    }

    /// Reaction removals requested so far, as (channel, user, option_index)
    pub fn removed_reactions(&self) -> Vec<(Snowflake, Snowflake, usize)> {
        self.removed_reactions.lock().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(
        &self,
        channel_id: Snowflake,
        message: &str,
        ping_role_ids: &[Snowflake],
        ping_user_ids: &[Snowflake],
    ) -> Result<(), DeliveryError> {
        if *self.fail_sends.lock() {
            return Err(DeliveryError::new("channel unreachable"));
        }
        self.sent.lock().push(SentMessage {
            channel_id,
            message: message.to_string(),
            ping_role_ids: ping_role_ids.to_vec(),
            ping_user_ids: ping_user_ids.to_vec(),
        });
        Ok(())
    }

    async fn remove_reaction(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        option_index: usize,
    ) -> Result<(), DeliveryError> {
        self.removed_reactions
            .lock()
            .push((channel_id, user_id, option_index));
        Ok(())
    }
}
