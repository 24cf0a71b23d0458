//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use jobtrack_core::config::AppConfig;
use jobtrack_core::error::AppError;
use jobtrack_database::DatabasePool;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Check that the database is reachable
    Ping,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;

    let result = match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            jobtrack_database::migration::run_migrations(db.pool()).await
        }
        MigrateCommand::Ping => db.health_check().await.and_then(|healthy| {
            if healthy {
                Ok(())
            } else {
                Err(AppError::service_unavailable("Database did not answer"))
            }
        }),
    };
    db.close().await;
    result?;

    match &args.command {
        MigrateCommand::Run => output::print_success("All migrations applied successfully."),
        MigrateCommand::Ping => output::print_success("Database is reachable."),
    }
    Ok(())
}
