//! # remind-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! pure scheduling/rendering logic (trigger calculation, template substitution).
//! This crate has zero dependencies on infrastructure (database, platform client, etc.).

pub mod entities;
pub mod error;
pub mod render;
pub mod traits;
pub mod trigger;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    option_emoji, option_index_for_emoji, ExecutionLogEntry, ExecutionStatus, Poll, Priority,
    Reminder, Target, TargetKind, Template, Trigger, TriggerKind, Vote, MAX_COMMAND_OPTIONS,
    MAX_REACTION_OPTIONS, MIN_OPTIONS,
};
pub use error::DomainError;
pub use render::{render_template, RenderContext, RenderError};
pub use traits::{
    DeliveryError, ExecutionLogRepository, Notifier, PollRepository, ReminderRepository,
    RepoResult, TemplateRepository, VoteRepository,
};
pub use trigger::next_trigger;
pub use value_objects::{PollId, Snowflake, SnowflakeParseError};
