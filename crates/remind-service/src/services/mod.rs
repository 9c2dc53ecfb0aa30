//! Service layer
//!
//! One borrowing service struct per area, all sharing a [`ServiceContext`]
//! that owns the repository and notifier handles.

pub mod context;
pub mod error;
pub mod poll;
pub mod reminder;
pub mod target;
pub mod template;
pub mod vote;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use poll::{PollResults, PollService};
pub use reminder::{PollReminderBatch, ReminderService};
pub use target::{ResolvedTarget, TargetResolver};
pub use template::TemplateService;
pub use vote::VoteService;
