//! Engine facade
//!
//! Wires the scheduler, executor, and sweeps together and owns their
//! background task handles.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tokio::task::JoinHandle;
use tracing::{info, instrument};

use remind_common::config::SchedulerConfig;

use crate::executor::ReminderExecutor;
use crate::scheduler::JobScheduler;
use crate::services::{ServiceContext, ServiceResult};
use crate::watcher::{ExpiryWatcher, MissedReminderSweep};

/// Running automation engine: dispatch loop plus the two sweeps
pub struct ReminderEngine {
    scheduler: JobScheduler,
    tasks: Vec<JoinHandle<()>>,
}

impl ReminderEngine {
    /// Restore the schedule from the store and start the background tasks
    #[instrument(skip(ctx, config))]
    pub async fn start(ctx: ServiceContext, config: &SchedulerConfig) -> ServiceResult<Self> {
        let scheduler = JobScheduler::new();
        let executor = Arc::new(ReminderExecutor::new(ctx.clone()));

        let schedulable = ctx.reminder_repo().find_schedulable(Utc::now()).await?;
        let restored = scheduler.restore(&schedulable);

        let mut tasks = vec![scheduler.start(executor.clone())];
        tasks.push(
            ExpiryWatcher::new(ctx.clone())
                .spawn(StdDuration::from_secs(config.expiry_sweep_seconds)),
        );
        tasks.push(
            MissedReminderSweep::new(
                ctx,
                executor,
                scheduler.clone(),
                Duration::minutes(config.missed_grace_minutes),
            )
            .spawn(StdDuration::from_secs(config.missed_sweep_seconds)),
        );

        info!(restored, "Reminder engine started");

        Ok(Self { scheduler, tasks })
    }

    /// Handle for registering and cancelling jobs
    pub fn scheduler(&self) -> &JobScheduler {
        &self.scheduler
    }

    /// Abort the background tasks. In-flight executions finish on their own.
    pub fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
        info!("Reminder engine stopped");
    }
}

impl Drop for ReminderEngine {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use remind_core::entities::{Reminder, Target, Trigger};
    use remind_core::value_objects::Snowflake;
    use uuid::Uuid;

    use crate::notify::NullNotifier;

    #[tokio::test]
    async fn test_start_restores_schedulable_reminders() {
        let ctx = ServiceContext::in_memory(Arc::new(NullNotifier));

        let mut reminder = Reminder::new(
            Uuid::new_v4(),
            Target::Custom,
            Snowflake::new(5),
            Trigger::Interval {
                minutes: 10,
                max_occurrences: None,
            },
            Snowflake::new(1),
        );
        reminder.next_trigger = Some(Utc::now() + Duration::minutes(10));
        ctx.reminder_repo().create(&reminder).await.unwrap();

        let mut engine = ReminderEngine::start(ctx, &SchedulerConfig::default())
            .await
            .unwrap();
        assert_eq!(engine.scheduler().len(), 1);
        engine.shutdown();
    }
}
