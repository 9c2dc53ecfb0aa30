//! Reminder lifecycle flows: trigger math, the recurrence cap, and the
//! expiry sweep

use chrono::{Duration, Utc};
use integration_tests::{seed_closing_poll, seed_template, unique_snowflake, TestHarness};
use remind_core::entities::{Priority, Target, Trigger};
use remind_service::{ExecutionOutcome, ExpiryWatcher, ReminderService};

#[tokio::test]
async fn test_time_before_trigger_math() {
    let h = TestHarness::new();
    seed_template(&h.ctx, "closing", "'{poll_title}' closes in {time_left}", Priority::Urgent)
        .await;
    let reminders = ReminderService::new(&h.ctx, &h.scheduler);

    // 45 minutes of runway and a 30 minute lead: fires 30m before expiry
    let poll = seed_closing_poll(&h.ctx, Duration::minutes(45)).await;
    let reminder = reminders
        .create(
            "closing",
            Target::Poll(poll.id.clone()),
            unique_snowflake(),
            Trigger::TimeBefore { minutes: 30 },
            unique_snowflake(),
            None,
        )
        .await
        .unwrap();
    assert_eq!(
        reminder.next_trigger,
        Some(poll.expires_at.unwrap() - Duration::minutes(30))
    );

    // 10 minutes of runway: the lead window has already passed
    let tight = seed_closing_poll(&h.ctx, Duration::minutes(10)).await;
    let reminder = reminders
        .create(
            "closing",
            Target::Poll(tight.id),
            unique_snowflake(),
            Trigger::TimeBefore { minutes: 30 },
            unique_snowflake(),
            None,
        )
        .await
        .unwrap();
    assert_eq!(reminder.next_trigger, None);
}

#[tokio::test]
async fn test_recurrence_cap_fires_exactly_three_times() {
    let h = TestHarness::new();
    seed_template(&h.ctx, "standup", "sync-up time", Priority::Informational).await;

    let reminder = ReminderService::new(&h.ctx, &h.scheduler)
        .create(
            "standup",
            Target::Custom,
            unique_snowflake(),
            Trigger::Interval {
                minutes: 5,
                max_occurrences: Some(3),
            },
            unique_snowflake(),
            None,
        )
        .await
        .unwrap();

    for firing in 1..=3 {
        let outcome = h.executor.execute(reminder.id).await;
        assert!(
            matches!(outcome, ExecutionOutcome::Sent { .. }),
            "firing {firing} should send"
        );
    }
    assert_eq!(h.notifier.sent().len(), 3);

    let stored = h.ctx.reminder_repo().find_by_id(reminder.id).await.unwrap().unwrap();
    assert!(!stored.is_active);
    assert_eq!(stored.occurrence_count, 3);

    // A fourth due tick produces no firing
    let outcome = h.executor.execute(reminder.id).await;
    assert!(matches!(outcome, ExecutionOutcome::Skipped));
    assert_eq!(h.notifier.sent().len(), 3);
}

#[tokio::test]
async fn test_expiry_sweep_is_idempotent() {
    let h = TestHarness::new();
    let poll = seed_closing_poll(&h.ctx, Duration::minutes(-5)).await;

    let watcher = ExpiryWatcher::new(h.ctx.clone());
    let now = Utc::now();

    assert_eq!(watcher.run_once(now).await.unwrap(), 1);
    let stored = h.ctx.poll_repo().find_by_id(&poll.id).await.unwrap().unwrap();
    assert!(!stored.is_active);
    assert_eq!(h.notifier.sent().len(), 1);

    // Repeating the pass before any other mutation is a no-op
    assert_eq!(watcher.run_once(now).await.unwrap(), 0);
    assert_eq!(h.notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_cancel_blocks_a_pending_execution() {
    let h = TestHarness::new();
    seed_template(&h.ctx, "notice", "{message}", Priority::Informational).await;
    let reminders = ReminderService::new(&h.ctx, &h.scheduler);

    let reminder = reminders
        .create(
            "notice",
            Target::Custom,
            unique_snowflake(),
            Trigger::SpecificTime(Utc::now() + Duration::minutes(1)),
            unique_snowflake(),
            None,
        )
        .await
        .unwrap();

    assert!(reminders.cancel(reminder.id).await.unwrap());

    // A job already queued still runs, but the active check blocks the send
    let outcome = h.executor.execute(reminder.id).await;
    assert!(matches!(outcome, ExecutionOutcome::Skipped));
    assert!(h.notifier.sent().is_empty());
}
