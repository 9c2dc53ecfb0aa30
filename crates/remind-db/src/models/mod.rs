//! Database models - row structs with SQLx `FromRow` derives

mod execution_log;
mod poll;
mod reminder;
mod template;
mod vote;

pub use execution_log::ExecutionLogModel;
pub use poll::PollModel;
pub use reminder::ReminderModel;
pub use template::TemplateModel;
pub use vote::{VoteCountModel, VoteModel};
