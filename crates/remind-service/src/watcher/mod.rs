//! Periodic sweeps
//!
//! [`ExpiryWatcher`] closes polls whose deadline has passed, and
//! [`MissedReminderSweep`] fires reminders the scheduler slept through
//! (process restarts, clock jumps). Both expose `run_once` for direct use
//! and `spawn` for the background loop.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tokio::task::JoinHandle;
use tracing::{info, instrument, warn};

use crate::executor::ReminderExecutor;
use crate::scheduler::JobScheduler;
use crate::services::{ServiceContext, ServiceResult};

/// Closes expired polls and announces the closure in their channel
#[derive(Clone)]
pub struct ExpiryWatcher {
    ctx: ServiceContext,
}

impl ExpiryWatcher {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// One sweep pass. Returns the number of polls closed.
    ///
    /// The deactivation is committed before the announcement goes out, so
    /// a failed send never leaves the poll open for the next pass to
    /// re-close and re-announce.
    #[instrument(skip(self))]
    pub async fn run_once(&self, now: DateTime<Utc>) -> ServiceResult<usize> {
        let expired = self.ctx.poll_repo().find_expired(now).await?;
        let mut closed = 0;

        for mut poll in expired {
            poll.is_active = false;
            self.ctx.poll_repo().update(&poll).await?;
            closed += 1;

            info!(poll_id = %poll.id, "Poll closed by expiry sweep");

            let message = format!("📊 Poll '{}' has closed.", poll.question);
            if let Err(e) = self
                .ctx
                .notifier()
                .send(poll.channel_id, &message, &[], &[])
                .await
            {
                warn!(poll_id = %poll.id, error = %e, "Poll closure announcement failed");
            }
        }

        Ok(closed)
    }

    /// Spawn the sweep loop with the given period
    pub fn spawn(self, period: StdDuration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = self.run_once(Utc::now()).await {
                    warn!(error = %e, "Expiry sweep failed");
                }
            }
        })
    }
}

/// Fires reminders whose trigger time fell inside the grace window while
/// no scheduler was watching
#[derive(Clone)]
pub struct MissedReminderSweep {
    ctx: ServiceContext,
    executor: Arc<ReminderExecutor>,
    scheduler: JobScheduler,
    grace: Duration,
}

impl MissedReminderSweep {
    pub fn new(
        ctx: ServiceContext,
        executor: Arc<ReminderExecutor>,
        scheduler: JobScheduler,
        grace: Duration,
    ) -> Self {
        Self {
            ctx,
            executor,
            scheduler,
            grace,
        }
    }

    /// One sweep pass. Returns the number of reminders executed.
    ///
    /// Anything older than the grace window is left alone; stale
    /// notifications are worse than dropped ones.
    #[instrument(skip(self))]
    pub async fn run_once(&self, now: DateTime<Utc>) -> ServiceResult<usize> {
        let missed = self.ctx.reminder_repo().find_missed(now, self.grace).await?;
        let mut executed = 0;

        for reminder in missed {
            let outcome = self.executor.execute(reminder.id).await;
            executed += 1;
            if let Some(at) = outcome.rearm() {
                self.scheduler.register(reminder.id, at);
            }
        }

        if executed > 0 {
            info!(executed, "Missed reminders caught up");
        }

        Ok(executed)
    }

    /// Spawn the sweep loop with the given period
    pub fn spawn(self, period: StdDuration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if let Err(e) = self.run_once(Utc::now()).await {
                    warn!(error = %e, "Missed-reminder sweep failed");
                }
            }
        })
    }
}
