//! CLI command definitions and dispatch.

pub mod billing;
pub mod jobs;
pub mod migrate;
pub mod reminders;
pub mod user;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use jobtrack_core::config::AppConfig;
use jobtrack_core::error::AppError;
use jobtrack_database::{DatabasePool, Stores};

/// Jobtrack: job-application tracker with follow-up reminders
#[derive(Debug, Parser)]
#[command(name = "jobtrack", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file; overrides `--env`
    #[arg(short, long)]
    pub config: Option<String>,

    /// Environment overlay read from `config/{env}.toml`
    #[arg(short, long, default_value = "development")]
    pub env: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// User management
    User(user::UserArgs),
    /// Plan management
    Billing(billing::BillingArgs),
    /// Run the reminder engine by hand
    Reminders(reminders::RemindersArgs),
    /// Inspect a user's jobs
    Jobs(jobs::JobsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = self.load_config()?;
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::User(args) => user::execute(args, &config, self.format).await,
            Commands::Billing(args) => billing::execute(args, &config, self.format).await,
            Commands::Reminders(args) => reminders::execute(args, &config, self.format).await,
            Commands::Jobs(args) => jobs::execute(args, &config, self.format).await,
        }
    }

    fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::from_file(path),
            None => AppConfig::load(&self.env),
        }
    }
}

/// Helper: connect to PostgreSQL and build the store bundle.
///
/// The in-memory store lives inside a single server process, so the CLI
/// always talks to the database.
pub async fn connect_stores(config: &AppConfig) -> Result<(DatabasePool, Stores), AppError> {
    if config.server.in_memory {
        return Err(AppError::configuration(
            "server.in_memory is set; the CLI needs a database to operate on",
        ));
    }
    let db = DatabasePool::connect(&config.database).await?;
    let stores = Stores::postgres(db.pool().clone());
    Ok((db, stores))
}
