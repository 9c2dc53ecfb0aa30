//! Reminder engine daemon
//!
//! Run with:
//! ```bash
//! cargo run -p remind-service
//! ```
//!
//! Configuration is loaded from environment variables (see `remind-common`).
//! Outbound delivery uses the tracing-only sink; a deployment wanting real
//! channel delivery supplies its own `Notifier` and embeds the engine as a
//! library instead.

use std::sync::Arc;

use remind_common::{try_init_tracing, AppConfig};
use remind_core::value_objects::Snowflake;
use remind_db::{
    create_pool, run_migrations, DatabaseConfig, PgExecutionLogRepository, PgPollRepository,
    PgReminderRepository, PgTemplateRepository, PgVoteRepository,
};
use remind_service::{install_default_templates, NullNotifier, ReminderEngine, ServiceContext};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "Engine failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting reminder engine...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Failed to load configuration");
        e
    })?;

    info!(env = ?config.app.env, "Configuration loaded");

    let pool = create_pool(&DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..DatabaseConfig::default()
    })
    .await?;
    run_migrations(&pool).await?;

    let ctx = ServiceContext::new(
        Arc::new(PgTemplateRepository::new(pool.clone())),
        Arc::new(PgReminderRepository::new(pool.clone())),
        Arc::new(PgExecutionLogRepository::new(pool.clone())),
        Arc::new(PgPollRepository::new(pool.clone())),
        Arc::new(PgVoteRepository::new(pool)),
        Arc::new(NullNotifier),
    );

    let installed = install_default_templates(&ctx, Snowflake::new(0)).await?;
    if installed > 0 {
        info!(installed, "Default templates installed");
    }

    let mut engine = ReminderEngine::start(ctx, &config.scheduler).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");
    engine.shutdown();

    Ok(())
}
