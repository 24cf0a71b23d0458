//! Manual reminder engine runs, equivalent to the scheduler trigger calls.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use jobtrack_core::config::AppConfig;
use jobtrack_core::error::AppError;
use jobtrack_service::{ReminderDispatcher, ReminderFormatter, ReminderGenerator};

/// Arguments for reminder commands
#[derive(Debug, Args)]
pub struct RemindersArgs {
    /// Reminder subcommand
    #[command(subcommand)]
    pub command: RemindersCommand,
}

/// Reminder subcommands
#[derive(Debug, Subcommand)]
pub enum RemindersCommand {
    /// Create pending reminders for stale jobs
    Generate,
    /// Deliver due reminders through the configured mail transport
    Send {
        /// Override the configured batch size
        #[arg(long)]
        batch_size: Option<i64>,
    },
}

/// Execute reminder commands
pub async fn execute(
    args: &RemindersArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (db, stores) = super::connect_stores(config).await?;

    let result = match &args.command {
        RemindersCommand::Generate => {
            let generator = ReminderGenerator::new(
                stores.settings.clone(),
                stores.jobs.clone(),
                stores.reminders.clone(),
            );
            generator
                .generate()
                .await
                .map(|report| output::print_report(&report, format))
        }
        RemindersCommand::Send { batch_size } => {
            let mailer = jobtrack_notify::build_mailer(&config.mail)?;
            let dispatcher = ReminderDispatcher::new(
                stores.reminders.clone(),
                mailer,
                ReminderFormatter::new(&config.mail.app_base_url),
                batch_size.unwrap_or(config.reminders.dispatch_batch_size),
            );
            dispatcher.send().await.map(|report| {
                for error in &report.errors {
                    output::print_warning(error);
                }
                output::print_report(&report, format);
            })
        }
    };

    db.close().await;
    result
}
