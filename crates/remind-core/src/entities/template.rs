//! Template entity - a named, reusable message pattern plus priority/ping metadata

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::Snowflake;

/// Priority of a reminder template
///
/// Carries the presentation defaults used when rendering: embed color,
/// leading emoji, and the urgency prefix prepended to the message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Priority {
    Informational,
    Urgent,
    VeryUrgent,
    Critical,
}

impl Priority {
    /// Stable string form used in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Informational => "informational",
            Self::Urgent => "urgent",
            Self::VeryUrgent => "very_urgent",
            Self::Critical => "critical",
        }
    }

    /// Parse from the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "informational" => Some(Self::Informational),
            "urgent" => Some(Self::Urgent),
            "very_urgent" => Some(Self::VeryUrgent),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Default embed color for this priority
    pub fn color(&self) -> u32 {
        match self {
            Self::Informational => 0x3498db, // blue
            Self::Urgent => 0xf39c12,        // orange
            Self::VeryUrgent => 0xe74c3c,    // red
            Self::Critical => 0x8e44ad,      // purple
        }
    }

    /// Emoji shown in the rendered title
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Informational => "\u{1F499}", // 💙
            Self::Urgent => "\u{26A0}\u{FE0F}", // ⚠️
            Self::VeryUrgent => "\u{1F6A8}",    // 🚨
            Self::Critical => "\u{1F525}",      // 🔥
        }
    }

    /// Prefix prepended to the message body
    pub fn urgency_prefix(&self) -> &'static str {
        match self {
            Self::Informational => "",
            Self::Urgent => "**[URGENT]** ",
            Self::VeryUrgent => "**[VERY URGENT]** ",
            Self::Critical => "**[CRITICAL]** ",
        }
    }
}

/// Template entity
///
/// Immutable after creation except by explicit update; referenced, never
/// owned, by many reminders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub message_pattern: String,
    pub priority: Priority,
    pub ping_role_ids: Vec<Snowflake>,
    pub ping_user_ids: Vec<Snowflake>,
    pub color: u32,
    pub creator_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl Template {
    /// Create a new Template, defaulting the color from the priority
    pub fn new(
        name: String,
        description: String,
        message_pattern: String,
        priority: Priority,
        creator_id: Snowflake,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            message_pattern,
            priority,
            ping_role_ids: Vec::new(),
            ping_user_ids: Vec::new(),
            color: priority.color(),
            creator_id,
            created_at: Utc::now(),
        }
    }

    /// Set role/user pings to notify on dispatch
    pub fn with_pings(mut self, roles: Vec<Snowflake>, users: Vec<Snowflake>) -> Self {
        self.ping_role_ids = roles;
        self.ping_user_ids = users;
        self
    }

    /// Override the default priority color
    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    /// Check if this template pings anyone
    #[inline]
    pub fn has_pings(&self) -> bool {
        !self.ping_role_ids.is_empty() || !self.ping_user_ids.is_empty()
    }
}
