//! Reminder executor
//!
//! Runs one firing attempt end to end: load, render against live target
//! state, dispatch, log, and decide the next transition. Each step is its
//! own store access; the load's `is_active` check is the authoritative
//! cancellation guard, not state captured at job-creation time.

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use remind_core::entities::{ExecutionLogEntry, Reminder, Template, Trigger};
use remind_core::render::{render_template, RenderContext};
use remind_core::trigger::next_trigger;
use remind_core::DomainError;

use crate::services::{ServiceContext, TargetResolver};

/// Outcome of one firing attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Reminder was missing or inactive (expected race with cancellation)
    Skipped,
    /// Message dispatched; `rearm` carries the next fire time for recurring
    /// reminders still under their cap
    Sent { rearm: Option<DateTime<Utc>> },
    /// Attempt failed; a recurring reminder re-arms without consuming an
    /// occurrence, a one-shot is left inactive
    Failed { rearm: Option<DateTime<Utc>> },
}

impl ExecutionOutcome {
    /// Fire time to re-register, if any
    pub fn rearm(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Skipped => None,
            Self::Sent { rearm } | Self::Failed { rearm } => *rearm,
        }
    }
}

/// Reminder executor
pub struct ReminderExecutor {
    ctx: ServiceContext,
}

impl ReminderExecutor {
    /// Create a new ReminderExecutor
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Execute one firing attempt for `reminder_id`
    #[instrument(skip(self))]
    pub async fn execute(&self, reminder_id: Uuid) -> ExecutionOutcome {
        match self.try_execute(reminder_id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                // Store-level failure; the row is untouched and a recurring
                // reminder's queued schedule is simply gone until restart
                warn!(reminder_id = %reminder_id, error = %e, "Execution aborted");
                ExecutionOutcome::Failed { rearm: None }
            }
        }
    }

    async fn try_execute(&self, reminder_id: Uuid) -> Result<ExecutionOutcome, DomainError> {
        let now = Utc::now();

        let Some(mut reminder) = self.ctx.reminder_repo().find_by_id(reminder_id).await? else {
            debug!(reminder_id = %reminder_id, "Reminder gone; skipping");
            return Ok(ExecutionOutcome::Skipped);
        };
        if !reminder.is_active {
            debug!(reminder_id = %reminder_id, "Reminder inactive; skipping");
            return Ok(ExecutionOutcome::Skipped);
        }

        let Some(template) = self
            .ctx
            .template_repo()
            .find_by_id(reminder.template_id)
            .await?
        else {
            self.log(ExecutionLogEntry::failed(reminder.id, "template not found"))
                .await;
            reminder.deactivate();
            self.ctx.reminder_repo().update(&reminder).await?;
            return Ok(ExecutionOutcome::Failed { rearm: None });
        };

        let resolved = TargetResolver::new(&self.ctx)
            .resolve(&reminder.target, now)
            .await
            .map_err(|e| DomainError::InternalError(e.to_string()))?;

        let mut render_ctx = RenderContext::new();
        render_ctx.insert("current_time", now.format("%Y-%m-%d %H:%M UTC").to_string());
        resolved.apply(&mut render_ctx);
        render_ctx.overlay(&reminder.custom_data);

        let message = match render_template(&template.message_pattern, &render_ctx) {
            Ok(body) => compose_message(&template, &body),
            Err(e) => {
                // An unresolved placeholder is recoverable: log it by key,
                // send nothing
                self.log(ExecutionLogEntry::failed(reminder.id, e.to_string()))
                    .await;
                return self
                    .transition_after_failure(reminder, resolved.expires_at, now)
                    .await;
            }
        };

        let sent = self
            .ctx
            .notifier()
            .send(
                reminder.channel_id,
                &message,
                &template.ping_role_ids,
                &template.ping_user_ids,
            )
            .await;

        match sent {
            Ok(()) => {
                self.log(ExecutionLogEntry::sent(reminder.id, message)).await;
                reminder.record_firing(now);

                let rearm = if reminder.is_recurring() && reminder.under_occurrence_cap() {
                    next_trigger(&reminder.trigger, now, resolved.expires_at)
                } else {
                    None
                };
                match rearm {
                    Some(at) => reminder.next_trigger = Some(at),
                    None => reminder.deactivate(),
                }
                self.ctx.reminder_repo().update(&reminder).await?;

                info!(
                    reminder_id = %reminder.id,
                    occurrence = reminder.occurrence_count,
                    rearmed = rearm.is_some(),
                    "Reminder dispatched"
                );
                Ok(ExecutionOutcome::Sent { rearm })
            }
            Err(e) => {
                self.log(ExecutionLogEntry::failed(reminder.id, e.to_string()))
                    .await;
                self.transition_after_failure(reminder, resolved.expires_at, now)
                    .await
            }
        }
    }

    /// A failed attempt consumes no occurrence: recurring reminders retry on
    /// the next interval tick, one-shots are left inactive.
    async fn transition_after_failure(
        &self,
        mut reminder: Reminder,
        target_expires_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<ExecutionOutcome, DomainError> {
        let rearm = if reminder.is_recurring() && reminder.under_occurrence_cap() {
            next_trigger(&reminder.trigger, now, target_expires_at)
        } else {
            None
        };
        match rearm {
            Some(at) => reminder.next_trigger = Some(at),
            None => reminder.deactivate(),
        }
        self.ctx.reminder_repo().update(&reminder).await?;
        Ok(ExecutionOutcome::Failed { rearm })
    }

    async fn log(&self, entry: ExecutionLogEntry) {
        if let Err(e) = self.ctx.log_repo().append(&entry).await {
            warn!(reminder_id = %entry.reminder_id, error = %e, "Failed to append execution log");
        }
    }
}

/// Priority presentation wrapped around the rendered body
fn compose_message(template: &Template, body: &str) -> String {
    format!(
        "{} {}{body}",
        template.priority.emoji(),
        template.priority.urgency_prefix()
    )
}
