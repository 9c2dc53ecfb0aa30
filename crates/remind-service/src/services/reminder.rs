//! Reminder service
//!
//! Creation (template lookup, trigger validation, initial scheduling),
//! batch poll-reminder setup, cancellation, listing, and log retrieval.

use std::collections::HashMap;

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use remind_core::entities::{ExecutionLogEntry, Reminder, Target, Trigger};
use remind_core::trigger::next_trigger;
use remind_core::value_objects::{PollId, Snowflake};
use remind_core::DomainError;

use crate::scheduler::JobScheduler;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::target::TargetResolver;

/// Outcome of a batch poll-reminder setup
#[derive(Debug, Default)]
pub struct PollReminderBatch {
    pub created: Vec<Reminder>,
    /// (template name, error) per reminder that could not be created
    pub failed: Vec<(String, ServiceError)>,
}

/// Reminder service
pub struct ReminderService<'a> {
    ctx: &'a ServiceContext,
    scheduler: &'a JobScheduler,
}

impl<'a> ReminderService<'a> {
    /// Create a new ReminderService
    pub fn new(ctx: &'a ServiceContext, scheduler: &'a JobScheduler) -> Self {
        Self { ctx, scheduler }
    }

    /// Create a reminder and arm it when its trigger lies in the future.
    ///
    /// A `time_before` trigger whose window has already passed (or whose
    /// target is gone) stays unscheduled by design; the call still succeeds.
    #[instrument(skip(self, custom_data))]
    pub async fn create(
        &self,
        template_name: &str,
        target: Target,
        channel_id: Snowflake,
        trigger: Trigger,
        creator_id: Snowflake,
        custom_data: Option<HashMap<String, String>>,
    ) -> ServiceResult<Reminder> {
        validate_trigger(&trigger)?;

        let template = self
            .ctx
            .template_repo()
            .find_by_name(template_name)
            .await?
            .ok_or_else(|| DomainError::TemplateNotFound(template_name.to_string()))?;

        let now = Utc::now();
        let resolved = TargetResolver::new(self.ctx).resolve(&target, now).await?;

        let mut reminder = Reminder::new(template.id, target, channel_id, trigger, creator_id);
        if let Some(data) = custom_data {
            reminder = reminder.with_custom_data(data);
        }
        reminder.next_trigger = next_trigger(&reminder.trigger, now, resolved.expires_at);

        self.ctx.reminder_repo().create(&reminder).await?;

        // Only future times are armed; a past specific_time is stored as-is
        // and picked up, if at all, by the missed-reminder sweep
        match reminder.next_trigger {
            Some(at) if at > now => self.scheduler.register(reminder.id, at),
            Some(_) | None => {}
        }

        info!(
            reminder_id = %reminder.id,
            template = template_name,
            trigger = reminder.trigger.kind().as_str(),
            scheduled = reminder.next_trigger.is_some(),
            "Reminder created"
        );

        Ok(reminder)
    }

    /// Create one `time_before` reminder per (template, lead minutes) pair
    /// for a poll, continuing past individual failures.
    #[instrument(skip(self, specs))]
    pub async fn setup_poll_reminders(
        &self,
        poll_id: &PollId,
        channel_id: Snowflake,
        creator_id: Snowflake,
        specs: &[(&str, i64)],
    ) -> ServiceResult<PollReminderBatch> {
        let mut batch = PollReminderBatch::default();
        for &(template_name, minutes_before) in specs {
            let result = self
                .create(
                    template_name,
                    Target::Poll(poll_id.clone()),
                    channel_id,
                    Trigger::TimeBefore {
                        minutes: minutes_before,
                    },
                    creator_id,
                    None,
                )
                .await;
            match result {
                Ok(reminder) => batch.created.push(reminder),
                Err(e) => {
                    warn!(
                        poll_id = %poll_id,
                        template = template_name,
                        error = %e,
                        "Skipping poll reminder"
                    );
                    batch.failed.push((template_name.to_string(), e));
                }
            }
        }
        Ok(batch)
    }

    /// Cancel a reminder. Returns false when it was already inactive.
    ///
    /// The scheduler removal is best-effort; the executor's own `is_active`
    /// check is the authoritative guard for any job already queued.
    #[instrument(skip(self))]
    pub async fn cancel(&self, reminder_id: Uuid) -> ServiceResult<bool> {
        let Some(mut reminder) = self.ctx.reminder_repo().find_by_id(reminder_id).await? else {
            return Err(DomainError::ReminderNotFound(reminder_id).into());
        };
        if !reminder.is_active {
            return Ok(false);
        }

        reminder.deactivate();
        self.ctx.reminder_repo().update(&reminder).await?;
        self.scheduler.cancel(reminder_id);

        info!(reminder_id = %reminder_id, "Reminder cancelled");
        Ok(true)
    }

    /// List reminders with optional creator/active filters
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        creator_id: Option<Snowflake>,
        is_active: Option<bool>,
    ) -> ServiceResult<Vec<Reminder>> {
        Ok(self.ctx.reminder_repo().list(creator_id, is_active).await?)
    }

    /// Execution log for one reminder, most recent first
    #[instrument(skip(self))]
    pub async fn get_logs(&self, reminder_id: Uuid) -> ServiceResult<Vec<ExecutionLogEntry>> {
        if self
            .ctx
            .reminder_repo()
            .find_by_id(reminder_id)
            .await?
            .is_none()
        {
            return Err(DomainError::ReminderNotFound(reminder_id).into());
        }
        Ok(self.ctx.log_repo().find_by_reminder(reminder_id).await?)
    }
}

/// Reject malformed trigger parameters before anything is persisted
fn validate_trigger(trigger: &Trigger) -> ServiceResult<()> {
    match trigger {
        Trigger::SpecificTime(_) => Ok(()),
        Trigger::TimeBefore { minutes } | Trigger::Interval { minutes, .. } if *minutes <= 0 => {
            Err(DomainError::InvalidTrigger("minutes must be positive".to_string()).into())
        }
        Trigger::Interval {
            max_occurrences: Some(cap),
            ..
        } if *cap <= 0 => {
            Err(DomainError::InvalidTrigger("max_occurrences must be positive".to_string()).into())
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Duration;
    use remind_core::entities::{Poll, Priority, Template};

    use crate::notify::NullNotifier;

    struct Fixture {
        ctx: ServiceContext,
        scheduler: JobScheduler,
    }

    fn fixture() -> Fixture {
        Fixture {
            ctx: ServiceContext::in_memory(Arc::new(NullNotifier)),
            scheduler: JobScheduler::new(),
        }
    }

    async fn seed_template(ctx: &ServiceContext, name: &str) {
        let template = Template::new(
            name.to_string(),
            String::new(),
            "Poll '{poll_title}' closes in {time_left}".to_string(),
            Priority::Urgent,
            Snowflake::new(1),
        );
        ctx.template_repo().create(&template).await.unwrap();
    }

    async fn seed_poll(ctx: &ServiceContext, expires_in_minutes: i64) -> Poll {
        let poll = Poll::new(
            "Best day?".to_string(),
            vec!["Sat".to_string(), "Sun".to_string()],
            Snowflake::new(1),
            Snowflake::new(2),
            false,
            Some(Utc::now() + Duration::minutes(expires_in_minutes)),
        );
        ctx.poll_repo().create(&poll).await.unwrap();
        poll
    }

    #[tokio::test]
    async fn test_create_with_unknown_template() {
        let f = fixture();
        let err = ReminderService::new(&f.ctx, &f.scheduler)
            .create(
                "nope",
                Target::Custom,
                Snowflake::new(5),
                Trigger::SpecificTime(Utc::now() + Duration::hours(1)),
                Snowflake::new(1),
                None,
            )
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_TEMPLATE");
        assert!(f.ctx.reminder_repo().list(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_time_before_with_enough_lead() {
        let f = fixture();
        seed_template(&f.ctx, "closing").await;
        let poll = seed_poll(&f.ctx, 45).await;

        let reminder = ReminderService::new(&f.ctx, &f.scheduler)
            .create(
                "closing",
                Target::Poll(poll.id.clone()),
                Snowflake::new(5),
                Trigger::TimeBefore { minutes: 30 },
                Snowflake::new(1),
                None,
            )
            .await
            .unwrap();

        let expected = poll.expires_at.unwrap() - Duration::minutes(30);
        assert_eq!(reminder.next_trigger, Some(expected));
        assert_eq!(f.scheduler.len(), 1);
    }

    #[tokio::test]
    async fn test_create_time_before_window_passed_stays_unscheduled() {
        let f = fixture();
        seed_template(&f.ctx, "closing").await;
        let poll = seed_poll(&f.ctx, 10).await;

        let reminder = ReminderService::new(&f.ctx, &f.scheduler)
            .create(
                "closing",
                Target::Poll(poll.id),
                Snowflake::new(5),
                Trigger::TimeBefore { minutes: 30 },
                Snowflake::new(1),
                None,
            )
            .await
            .unwrap();

        // Creation still succeeds; nothing is armed
        assert_eq!(reminder.next_trigger, None);
        assert!(reminder.is_active);
        assert!(f.scheduler.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_bad_trigger_params() {
        let f = fixture();
        seed_template(&f.ctx, "t").await;
        let svc = ReminderService::new(&f.ctx, &f.scheduler);

        for trigger in [
            Trigger::Interval {
                minutes: 0,
                max_occurrences: None,
            },
            Trigger::TimeBefore { minutes: -5 },
            Trigger::Interval {
                minutes: 5,
                max_occurrences: Some(0),
            },
        ] {
            let err = svc
                .create(
                    "t",
                    Target::Custom,
                    Snowflake::new(5),
                    trigger,
                    Snowflake::new(1),
                    None,
                )
                .await
                .unwrap_err();
            assert_eq!(err.error_code(), "INVALID_TRIGGER");
        }
        assert!(f.ctx.reminder_repo().list(None, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_setup_poll_reminders_continues_past_failures() {
        let f = fixture();
        seed_template(&f.ctx, "closing").await;
        let poll = seed_poll(&f.ctx, 120).await;

        let batch = ReminderService::new(&f.ctx, &f.scheduler)
            .setup_poll_reminders(
                &poll.id,
                Snowflake::new(5),
                Snowflake::new(1),
                &[("closing", 60), ("missing_template", 30), ("closing", 15)],
            )
            .await
            .unwrap();

        assert_eq!(batch.created.len(), 2);
        assert_eq!(batch.failed.len(), 1);
        assert_eq!(batch.failed[0].0, "missing_template");
    }

    #[tokio::test]
    async fn test_cancel_twice() {
        let f = fixture();
        seed_template(&f.ctx, "t").await;
        let svc = ReminderService::new(&f.ctx, &f.scheduler);

        let reminder = svc
            .create(
                "t",
                Target::Custom,
                Snowflake::new(5),
                Trigger::SpecificTime(Utc::now() + Duration::hours(1)),
                Snowflake::new(1),
                None,
            )
            .await
            .unwrap();

        assert!(svc.cancel(reminder.id).await.unwrap());
        assert!(!svc.cancel(reminder.id).await.unwrap());

        let stored = f.ctx.reminder_repo().find_by_id(reminder.id).await.unwrap().unwrap();
        assert!(!stored.is_active);
        assert!(stored.next_trigger.is_none());
    }

    #[tokio::test]
    async fn test_get_logs_for_unknown_reminder() {
        let f = fixture();
        let err = ReminderService::new(&f.ctx, &f.scheduler)
            .get_logs(Uuid::new_v4())
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_REMINDER");
    }
}
