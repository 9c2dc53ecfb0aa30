//! Domain entities - core business objects

mod execution_log;
mod poll;
mod reminder;
mod template;
mod vote;

pub use execution_log::{ExecutionLogEntry, ExecutionStatus};
pub use poll::{
    option_emoji, option_index_for_emoji, Poll, MAX_COMMAND_OPTIONS, MAX_REACTION_OPTIONS,
    MIN_OPTIONS,
};
pub use reminder::{Reminder, Target, TargetKind, Trigger, TriggerKind};
pub use template::{Priority, Template};
pub use vote::Vote;
