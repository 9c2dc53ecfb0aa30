//! Test fixtures and data generators
//!
//! Provides reusable test data for integration tests.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, Duration, Utc};
use remind_core::entities::{Poll, Priority, Template};
use remind_core::value_objects::Snowflake;
use remind_service::ServiceContext;

/// Counter for unique test data
static COUNTER: AtomicI64 = AtomicI64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> i64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A fresh snowflake no other fixture in the process has used
pub fn unique_snowflake() -> Snowflake {
    Snowflake::new(unique_suffix())
}

/// Seed a template and return it
pub async fn seed_template(
    ctx: &ServiceContext,
    name: &str,
    pattern: &str,
    priority: Priority,
) -> Template {
    let template = Template::new(
        name.to_string(),
        format!("{name} (fixture)"),
        pattern.to_string(),
        priority,
        unique_snowflake(),
    );
    ctx.template_repo()
        .create(&template)
        .await
        .expect("fixture template");
    template
}

/// Seed a reaction-mode poll expiring at the given time
pub async fn seed_poll(
    ctx: &ServiceContext,
    question: &str,
    options: &[&str],
    expires_at: Option<DateTime<Utc>>,
) -> Poll {
    let poll = Poll::new(
        question.to_string(),
        options.iter().map(|o| (*o).to_string()).collect(),
        unique_snowflake(),
        unique_snowflake(),
        false,
        expires_at,
    );
    ctx.poll_repo().create(&poll).await.expect("fixture poll");
    poll
}

/// Seed an advanced (multi-select) poll
pub async fn seed_advanced_poll(ctx: &ServiceContext, question: &str, options: &[&str]) -> Poll {
    let poll = Poll::new(
        question.to_string(),
        options.iter().map(|o| (*o).to_string()).collect(),
        unique_snowflake(),
        unique_snowflake(),
        true,
        None,
    );
    ctx.poll_repo().create(&poll).await.expect("fixture poll");
    poll
}

/// A poll closing soon, for reminder-lead tests
pub async fn seed_closing_poll(ctx: &ServiceContext, closes_in: Duration) -> Poll {
    seed_poll(
        ctx,
        "Which build should ship?",
        &["alpha", "beta"],
        Some(Utc::now() + closes_in),
    )
    .await
}
