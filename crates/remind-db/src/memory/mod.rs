//! In-memory repository implementations
//!
//! Lock-protected maps behind the same traits the PostgreSQL backend
//! implements. Used by service-layer tests and embedded deployments
//! where a database is unavailable.

mod execution_log;
mod poll;
mod reminder;
mod template;
mod vote;

pub use execution_log::InMemoryExecutionLogRepository;
pub use poll::InMemoryPollRepository;
pub use reminder::InMemoryReminderRepository;
pub use template::InMemoryTemplateRepository;
pub use vote::InMemoryVoteRepository;
