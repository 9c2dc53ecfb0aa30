//! Notification sink (port) - abstract message delivery
//!
//! Concrete delivery (chat platform client, webhook, ...) lives outside this
//! core. The executor and the vote reconciler only depend on this trait.

use async_trait::async_trait;
use thiserror::Error;

use crate::value_objects::Snowflake;

/// Delivery failure reported by a notification sink
#[derive(Debug, Clone, Error)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);

impl DeliveryError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// Abstract capability to reach the channel a poll or reminder lives in
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Dispatch a rendered message to a channel with the given pings
    async fn send(
        &self,
        channel_id: Snowflake,
        message: &str,
        ping_role_ids: &[Snowflake],
        ping_user_ids: &[Snowflake],
    ) -> Result<(), DeliveryError>;

    /// Best-effort removal of a user's option reaction on a poll message,
    /// keeping visible reactions from drifting away from the stored votes
    async fn remove_reaction(
        &self,
        channel_id: Snowflake,
        user_id: Snowflake,
        option_index: usize,
    ) -> Result<(), DeliveryError>;
}
