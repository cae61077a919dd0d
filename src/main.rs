//! Linkbox server — hosts the expiring link store and its background sweep.
//!
//! Opens the store described by the configuration, sweeps once at startup,
//! then runs the periodic sweep until Ctrl-C.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use linkbox_core::config::AppConfig;
use linkbox_core::error::AppError;
use linkbox_service::LinkStore;
use linkbox_worker::task::run_logged;
use linkbox_worker::{CronScheduler, LinkSweepTask, MaintenanceTask};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("LINKBOX_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Linkbox v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Open the store ───────────────────────────────────
    let store = Arc::new(LinkStore::open(&config.store, &config.database).await?);
    let stats = store.stats().await?;
    tracing::info!(
        db_path = %config.store.db_path,
        link_duration_seconds = config.store.link_duration_seconds,
        live = stats.live,
        expired = stats.expired,
        "Link store ready"
    );

    // ── Step 2: Sweep whatever expired while we were down ────────
    let sweep: Arc<dyn MaintenanceTask> = Arc::new(LinkSweepTask::new(Arc::clone(&store)));
    run_logged(sweep.as_ref()).await;

    // ── Step 3: Periodic sweep ───────────────────────────────────
    let scheduler = if config.sweeper.enabled {
        let scheduler = CronScheduler::new().await?;
        scheduler
            .register(Arc::clone(&sweep), &config.sweeper.schedule)
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::warn!("Periodic sweep disabled; expired links are only removed on read");
        None
    };

    // ── Step 4: Wait for shutdown ────────────────────────────────
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| AppError::internal(format!("Failed to listen for shutdown: {}", e)))?;
    tracing::info!("Shutdown signal received");

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await?;
    }
    store.close().await;

    tracing::info!("Linkbox stopped");
    Ok(())
}
