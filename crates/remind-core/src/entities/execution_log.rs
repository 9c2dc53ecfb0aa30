//! Execution log entry - append-only record of a firing attempt

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Outcome of a single firing attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStatus {
    Sent,
    Failed,
    Skipped,
}

impl ExecutionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
            Self::Skipped => "skipped",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sent" => Some(Self::Sent),
            "failed" => Some(Self::Failed),
            "skipped" => Some(Self::Skipped),
            _ => None,
        }
    }
}

/// One row of the append-only execution log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionLogEntry {
    pub id: Uuid,
    pub reminder_id: Uuid,
    pub triggered_at: DateTime<Utc>,
    pub status: ExecutionStatus,
    pub error_message: Option<String>,
    pub rendered_message: Option<String>,
}

impl ExecutionLogEntry {
    /// Record a successful dispatch with the rendered message
    pub fn sent(reminder_id: Uuid, rendered_message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            reminder_id,
            triggered_at: Utc::now(),
            status: ExecutionStatus::Sent,
            error_message: None,
            rendered_message: Some(rendered_message),
        }
    }

    /// Record a failed attempt with the error text
    pub fn failed(reminder_id: Uuid, error: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            reminder_id,
            triggered_at: Utc::now(),
            status: ExecutionStatus::Failed,
            error_message: Some(error.into()),
            rendered_message: None,
        }
    }

    /// Record a skipped attempt (e.g. raced with cancellation)
    pub fn skipped(reminder_id: Uuid, reason: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            reminder_id,
            triggered_at: Utc::now(),
            status: ExecutionStatus::Skipped,
            error_message: Some(reason.into()),
            rendered_message: None,
        }
    }
}
