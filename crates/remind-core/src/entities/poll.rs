//! Poll entity - an expiring voteable resource

use chrono::{DateTime, Utc};

use crate::value_objects::{PollId, Snowflake};

/// Minimum number of options for any poll
pub const MIN_OPTIONS: usize = 2;

/// Maximum options for reaction-mode polls (one regional-indicator emoji each)
pub const MAX_REACTION_OPTIONS: usize = 20;

/// Maximum options for advanced (command-only) polls
pub const MAX_COMMAND_OPTIONS: usize = 50;

/// Emoji used for option `index` on a poll message (🇦 .. 🇹)
pub fn option_emoji(index: usize) -> Option<char> {
    if index < MAX_REACTION_OPTIONS {
        char::from_u32(0x1F1E6 + index as u32)
    } else {
        None
    }
}

/// Map a reaction emoji back to an option index, if it is in the recognized range
pub fn option_index_for_emoji(emoji: &str) -> Option<usize> {
    let mut chars = emoji.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let code = c as u32;
    if (0x1F1E6..0x1F1E6 + MAX_REACTION_OPTIONS as u32).contains(&code) {
        Some((code - 0x1F1E6) as usize)
    } else {
        None
    }
}

/// Poll entity
///
/// Mutated by the expiry watcher (deactivate) and by deletion (cascading its
/// votes); never mutated by vote reconciliation itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poll {
    pub id: PollId,
    pub question: String,
    pub options: Vec<String>,
    pub creator_id: Snowflake,
    pub channel_id: Snowflake,
    pub is_active: bool,
    pub is_advanced: bool,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Poll {
    /// Create a new active Poll
    pub fn new(
        question: String,
        options: Vec<String>,
        creator_id: Snowflake,
        channel_id: Snowflake,
        is_advanced: bool,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: PollId::generate(),
            question,
            options,
            creator_id,
            channel_id,
            is_active: true,
            is_advanced,
            created_at: Utc::now(),
            expires_at,
        }
    }

    /// Check if the deadline has passed at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|e| now > e)
    }

    /// Check if an option index is valid for this poll
    #[inline]
    pub fn has_option(&self, index: usize) -> bool {
        index < self.options.len()
    }

    /// Remaining time rendered as "Xh Ym", "Ym", or "Expired"
    pub fn time_left_at(&self, now: DateTime<Utc>) -> String {
        match self.expires_at {
            Some(expires) if expires > now => {
                let secs = (expires - now).num_seconds();
                let hours = secs / 3600;
                let minutes = (secs % 3600) / 60;
                if hours > 0 {
                    format!("{hours}h {minutes}m")
                } else {
                    format!("{minutes}m")
                }
            }
            _ => "Expired".to_string(),
        }
    }
}
