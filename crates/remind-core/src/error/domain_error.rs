//! Domain errors - error types for the domain layer

use thiserror::Error;
use uuid::Uuid;

use crate::value_objects::PollId;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Reminder not found: {0}")]
    ReminderNotFound(Uuid),

    #[error("Poll not found: {0}")]
    PollNotFound(PollId),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid option index {index}: poll has {option_count} options")]
    InvalidOptionIndex { index: usize, option_count: usize },

    #[error("Invalid trigger parameters: {0}")]
    InvalidTrigger(String),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Template name already in use: {0}")]
    TemplateNameExists(String),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Poll is closed: {0}")]
    PollClosed(PollId),

    #[error("Poll has expired: {0}")]
    PollExpired(PollId),

    #[error("Poll only allows voting for one option")]
    SingleChoicePoll,

    #[error("Not the poll creator")]
    NotPollCreator,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for caller-facing responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::TemplateNotFound(_) => "UNKNOWN_TEMPLATE",
            Self::ReminderNotFound(_) => "UNKNOWN_REMINDER",
            Self::PollNotFound(_) => "UNKNOWN_POLL",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidOptionIndex { .. } => "INVALID_OPTION",
            Self::InvalidTrigger(_) => "INVALID_TRIGGER",

            // Conflict
            Self::TemplateNameExists(_) => "TEMPLATE_NAME_EXISTS",

            // Business Rules
            Self::PollClosed(_) => "POLL_CLOSED",
            Self::PollExpired(_) => "POLL_EXPIRED",
            Self::SingleChoicePoll => "SINGLE_CHOICE_POLL",
            Self::NotPollCreator => "NOT_POLL_CREATOR",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TemplateNotFound(_) | Self::ReminderNotFound(_) | Self::PollNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::InvalidOptionIndex { .. } | Self::InvalidTrigger(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::TemplateNameExists(_))
    }
}
