//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the storage layer provides
//! the implementation. The relational store is the single source of truth;
//! the in-memory scheduler is a rebuildable cache on top of it.

use async_trait::async_trait;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::entities::{ExecutionLogEntry, Poll, Reminder, Template, Vote};
use crate::error::DomainError;
use crate::value_objects::{PollId, Snowflake};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Template Repository
// ============================================================================

#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Find template by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Template>>;

    /// Find template by unique name
    async fn find_by_name(&self, name: &str) -> RepoResult<Option<Template>>;

    /// List all templates, optionally filtered by creator
    async fn list(&self, creator_id: Option<Snowflake>) -> RepoResult<Vec<Template>>;

    /// Create a new template
    async fn create(&self, template: &Template) -> RepoResult<()>;

    /// Update an existing template
    async fn update(&self, template: &Template) -> RepoResult<()>;
}

// ============================================================================
// Reminder Repository
// ============================================================================

#[async_trait]
pub trait ReminderRepository: Send + Sync {
    /// Find reminder by ID
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Reminder>>;

    /// List reminders with optional creator/active filters
    async fn list(
        &self,
        creator_id: Option<Snowflake>,
        is_active: Option<bool>,
    ) -> RepoResult<Vec<Reminder>>;

    /// Active reminders with a future schedule (scheduler rebuild on start)
    async fn find_schedulable(&self, now: DateTime<Utc>) -> RepoResult<Vec<Reminder>>;

    /// Active reminders whose trigger fell inside (now - grace, now]
    async fn find_missed(
        &self,
        now: DateTime<Utc>,
        grace: chrono::Duration,
    ) -> RepoResult<Vec<Reminder>>;

    /// Create a new reminder
    async fn create(&self, reminder: &Reminder) -> RepoResult<()>;

    /// Update scheduling state (occurrence_count, next_trigger, last_triggered, is_active)
    async fn update(&self, reminder: &Reminder) -> RepoResult<()>;
}

// ============================================================================
// Execution Log Repository
// ============================================================================

#[async_trait]
pub trait ExecutionLogRepository: Send + Sync {
    /// Append one firing record (the log is append-only)
    async fn append(&self, entry: &ExecutionLogEntry) -> RepoResult<()>;

    /// Entries for a reminder, most recent first
    async fn find_by_reminder(&self, reminder_id: Uuid) -> RepoResult<Vec<ExecutionLogEntry>>;
}

// ============================================================================
// Poll Repository
// ============================================================================

#[async_trait]
pub trait PollRepository: Send + Sync {
    /// Find poll by ID
    async fn find_by_id(&self, id: &PollId) -> RepoResult<Option<Poll>>;

    /// All currently active polls
    async fn find_active(&self) -> RepoResult<Vec<Poll>>;

    /// Active polls whose deadline has passed (expiry sweep input)
    async fn find_expired(&self, now: DateTime<Utc>) -> RepoResult<Vec<Poll>>;

    /// Create a new poll
    async fn create(&self, poll: &Poll) -> RepoResult<()>;

    /// Update an existing poll (deactivation)
    async fn update(&self, poll: &Poll) -> RepoResult<()>;

    /// Delete a poll; its votes cascade
    async fn delete(&self, id: &PollId) -> RepoResult<()>;
}

// ============================================================================
// Vote Repository
// ============================================================================

#[async_trait]
pub trait VoteRepository: Send + Sync {
    /// All votes for a poll
    async fn find_by_poll(&self, poll_id: &PollId) -> RepoResult<Vec<Vote>>;

    /// One user's current votes for a poll
    async fn find_by_poll_and_user(
        &self,
        poll_id: &PollId,
        user_id: Snowflake,
    ) -> RepoResult<Vec<Vote>>;

    /// Atomically replace the user's entire vote set for a poll.
    ///
    /// Delete-then-insert as a single consistency unit: a concurrent vote
    /// count reader never observes a mix of stale and fresh rows.
    async fn replace_for_user(
        &self,
        poll_id: &PollId,
        user_id: Snowflake,
        option_indices: &[usize],
    ) -> RepoResult<()>;

    /// Delete all votes for a poll (poll deletion cascade)
    async fn delete_by_poll(&self, poll_id: &PollId) -> RepoResult<()>;
}
