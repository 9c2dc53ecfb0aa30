//! # remind-service
//!
//! Application layer: template/reminder/poll/vote services, the reminder
//! executor, the in-memory job scheduler, the expiry and missed-reminder
//! sweeps, and the engine facade that wires them together over a
//! `ServiceContext`.

pub mod defaults;
pub mod engine;
pub mod executor;
pub mod notify;
pub mod scheduler;
pub mod services;
pub mod watcher;

// Re-export commonly used types at crate root
pub use defaults::install_default_templates;
pub use engine::ReminderEngine;
pub use executor::{ExecutionOutcome, ReminderExecutor};
pub use notify::{NullNotifier, RecordingNotifier, SentMessage};
pub use scheduler::JobScheduler;
pub use services::{
    PollReminderBatch, PollResults, PollService, ReminderService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, TemplateService, VoteService,
};
pub use watcher::{ExpiryWatcher, MissedReminderSweep};
