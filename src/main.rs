//! Jobtrack Server: job-application tracker with follow-up reminders.
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use jobtrack_api::{AppState, run_server};
use jobtrack_core::config::AppConfig;
use jobtrack_core::error::AppError;
use jobtrack_database::{DatabasePool, Stores};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    if let Ok(path) = std::env::var("JOBTRACK_CONFIG") {
        return AppConfig::from_file(&path);
    }
    let env = std::env::var("JOBTRACK_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
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
    tracing::info!("Starting Jobtrack v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Storage ──────────────────────────────────────────
    let (stores, db) = if config.server.in_memory {
        tracing::warn!("Using the in-memory store; data is lost on exit");
        (Stores::in_memory(), None)
    } else {
        let db = DatabasePool::connect(&config.database).await?;

        tracing::info!("Running database migrations...");
        jobtrack_database::migration::run_migrations(db.pool()).await?;
        tracing::info!("Database migrations complete");

        (Stores::postgres(db.pool().clone()), Some(db))
    };

    // ── Step 2: Notification transport ───────────────────────────
    tracing::info!("Initializing mail transport ({:?})...", config.mail.provider);
    let mailer = jobtrack_notify::build_mailer(&config.mail)?;

    // ── Step 3: Services ─────────────────────────────────────────
    if !config.server.in_memory && !config.billing.verifies_signatures() {
        tracing::error!(
            "billing.webhook_secret is empty; unsigned billing webhooks will be accepted"
        );
    }
    let state = AppState::new(config, &stores, mailer);
    if !state.trigger_guard.is_enabled() {
        tracing::warn!("Scheduler trigger endpoints accept unauthenticated calls");
    }

    // ── Step 4: Serve until shutdown ─────────────────────────────
    let result = run_server(state).await;

    if let Some(db) = db {
        db.close().await;
    }
    result
}
