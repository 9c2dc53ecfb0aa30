//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in remind-core.
//! Each repository handles database operations for a specific domain entity.

mod error;
mod execution_log;
mod poll;
mod reminder;
mod template;
mod vote;

pub use execution_log::PgExecutionLogRepository;
pub use poll::PgPollRepository;
pub use reminder::PgReminderRepository;
pub use template::PgTemplateRepository;
pub use vote::PgVoteRepository;
