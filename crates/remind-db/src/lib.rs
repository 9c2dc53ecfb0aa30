//! # remind-db
//!
//! Storage layer implementing the repository traits from `remind-core`.
//!
//! ## Overview
//!
//! Two backends share the same trait surface:
//!
//! - PostgreSQL via SQLx: connection pool management, `FromRow` models,
//!   entity ↔ model mappers, repository implementations. The vote
//!   replacement path runs inside an explicit transaction.
//! - In-memory: lock-protected maps, used by tests and embedded deployments.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use remind_db::pool::{create_pool, DatabaseConfig};
//! use remind_db::PgPollRepository;
//! use remind_core::traits::PollRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     let poll_repo = PgPollRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{
    InMemoryExecutionLogRepository, InMemoryPollRepository, InMemoryReminderRepository,
    InMemoryTemplateRepository, InMemoryVoteRepository,
};
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgExecutionLogRepository, PgPollRepository, PgReminderRepository, PgTemplateRepository,
    PgVoteRepository,
};
