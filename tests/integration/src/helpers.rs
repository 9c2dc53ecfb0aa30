//! Test helpers for integration tests
//!
//! Provides an in-memory harness wiring the full service stack behind a
//! recording notifier, plus the optional live-database hookup.

use std::sync::Arc;

use anyhow::Result;
use remind_common::try_init_tracing;
use remind_db::{create_pool_from_env, run_migrations, PgPool};
use remind_service::{JobScheduler, RecordingNotifier, ReminderExecutor, ServiceContext};

/// Full in-memory stack for one test
pub struct TestHarness {
    pub ctx: ServiceContext,
    pub notifier: Arc<RecordingNotifier>,
    pub scheduler: JobScheduler,
    pub executor: Arc<ReminderExecutor>,
}

impl TestHarness {
    /// Build a fresh harness; every test gets isolated state
    pub fn new() -> Self {
        // First caller in the process wins; later attempts are fine to fail
        let _ = try_init_tracing();
        let notifier = Arc::new(RecordingNotifier::new());
        let ctx = ServiceContext::in_memory(notifier.clone());
        let executor = Arc::new(ReminderExecutor::new(ctx.clone()));
        Self {
            ctx,
            notifier,
            scheduler: JobScheduler::new(),
            executor,
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Connect to the live database named by DATABASE_URL, running migrations.
///
/// Returns None (after printing a skip notice) when the variable is unset,
/// so database-backed tests pass trivially on machines without one.
pub async fn live_pool() -> Result<Option<PgPool>> {
    dotenvy::dotenv().ok();
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("Skipping test: DATABASE_URL not set");
        return Ok(None);
    }
    let pool = create_pool_from_env().await?;
    run_migrations(&pool).await?;
    Ok(Some(pool))
}
