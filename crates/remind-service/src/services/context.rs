//! Service context - dependency container for services
//!
//! Holds the repositories and the notification sink every service, the
//! executor, and the sweeps need.

use std::sync::Arc;

use remind_core::traits::{
    ExecutionLogRepository, Notifier, PollRepository, ReminderRepository, TemplateRepository,
    VoteRepository,
};
use remind_db::{
    InMemoryExecutionLogRepository, InMemoryPollRepository, InMemoryReminderRepository,
    InMemoryTemplateRepository, InMemoryVoteRepository,
};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// The relational store behind the repositories is the single source of
/// truth; everything else derives from it.
#[derive(Clone)]
pub struct ServiceContext {
    template_repo: Arc<dyn TemplateRepository>,
    reminder_repo: Arc<dyn ReminderRepository>,
    log_repo: Arc<dyn ExecutionLogRepository>,
    poll_repo: Arc<dyn PollRepository>,
    vote_repo: Arc<dyn VoteRepository>,
    notifier: Arc<dyn Notifier>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    pub fn new(
        template_repo: Arc<dyn TemplateRepository>,
        reminder_repo: Arc<dyn ReminderRepository>,
        log_repo: Arc<dyn ExecutionLogRepository>,
        poll_repo: Arc<dyn PollRepository>,
        vote_repo: Arc<dyn VoteRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            template_repo,
            reminder_repo,
            log_repo,
            poll_repo,
            vote_repo,
            notifier,
        }
    }

    /// Create a context backed entirely by in-memory repositories
    pub fn in_memory(notifier: Arc<dyn Notifier>) -> Self {
        Self::new(
            Arc::new(InMemoryTemplateRepository::new()),
            Arc::new(InMemoryReminderRepository::new()),
            Arc::new(InMemoryExecutionLogRepository::new()),
            Arc::new(InMemoryPollRepository::new()),
            Arc::new(InMemoryVoteRepository::new()),
            notifier,
        )
    }

    /// Get the template repository
    pub fn template_repo(&self) -> &dyn TemplateRepository {
        self.template_repo.as_ref()
    }

    /// Get the reminder repository
    pub fn reminder_repo(&self) -> &dyn ReminderRepository {
        self.reminder_repo.as_ref()
    }

    /// Get the execution log repository
    pub fn log_repo(&self) -> &dyn ExecutionLogRepository {
        self.log_repo.as_ref()
    }

    /// Get the poll repository
    pub fn poll_repo(&self) -> &dyn PollRepository {
        self.poll_repo.as_ref()
    }

    /// Get the vote repository
    pub fn vote_repo(&self) -> &dyn VoteRepository {
        self.vote_repo.as_ref()
    }

    /// Get the notification sink
    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("notifier", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    template_repo: Option<Arc<dyn TemplateRepository>>,
    reminder_repo: Option<Arc<dyn ReminderRepository>>,
    log_repo: Option<Arc<dyn ExecutionLogRepository>>,
    poll_repo: Option<Arc<dyn PollRepository>>,
    vote_repo: Option<Arc<dyn VoteRepository>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn template_repo(mut self, repo: Arc<dyn TemplateRepository>) -> Self {
        self.template_repo = Some(repo);
        self
    }

    pub fn reminder_repo(mut self, repo: Arc<dyn ReminderRepository>) -> Self {
        self.reminder_repo = Some(repo);
        self
    }

    pub fn log_repo(mut self, repo: Arc<dyn ExecutionLogRepository>) -> Self {
        self.log_repo = Some(repo);
        self
    }

    pub fn poll_repo(mut self, repo: Arc<dyn PollRepository>) -> Self {
        self.poll_repo = Some(repo);
        self
    }

    pub fn vote_repo(mut self, repo: Arc<dyn VoteRepository>) -> Self {
        self.vote_repo = Some(repo);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;
        Ok(ServiceContext::new(
            self.template_repo
                .ok_or_else(|| ServiceError::validation("template_repo is required"))?,
            self.reminder_repo
                .ok_or_else(|| ServiceError::validation("reminder_repo is required"))?,
            self.log_repo
                .ok_or_else(|| ServiceError::validation("log_repo is required"))?,
            self.poll_repo
                .ok_or_else(|| ServiceError::validation("poll_repo is required"))?,
            self.vote_repo
                .ok_or_else(|| ServiceError::validation("vote_repo is required"))?,
            self.notifier
                .ok_or_else(|| ServiceError::validation("notifier is required"))?,
        ))
    }
}
