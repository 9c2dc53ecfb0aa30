//! Ports - repository and notification interfaces

mod notifier;
mod repositories;

pub use notifier::{DeliveryError, Notifier};
pub use repositories::{
    ExecutionLogRepository, PollRepository, ReminderRepository, RepoResult, TemplateRepository,
    VoteRepository,
};
