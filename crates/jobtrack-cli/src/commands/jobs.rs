//! Read-only views over a user's job applications.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use jobtrack_core::config::AppConfig;
use jobtrack_core::error::AppError;
use jobtrack_service::{FollowupItem, JobService, RequestContext, UserService};

/// Arguments for job commands
#[derive(Debug, Args)]
pub struct JobsArgs {
    /// Job subcommand
    #[command(subcommand)]
    pub command: JobsCommand,
}

/// Job subcommands
#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// List a user's jobs
    List {
        /// Contact email
        email: String,
    },
    /// Jobs that are due for follow-up right now
    Followups {
        /// Contact email
        email: String,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct JobRow {
    id: String,
    company: String,
    role: String,
    stage: String,
    last_touched: String,
}

#[derive(Debug, Serialize, Tabled)]
struct FollowupRow {
    company: String,
    role: String,
    stage: String,
    days_since_touch: i64,
    threshold_days: i32,
}

impl From<&FollowupItem> for FollowupRow {
    fn from(item: &FollowupItem) -> Self {
        Self {
            company: item.job.company.clone(),
            role: item.job.role.clone(),
            stage: item.job.stage.to_string(),
            days_since_touch: item.days_since_touch,
            threshold_days: item.threshold_days,
        }
    }
}

/// Execute job commands
pub async fn execute(
    args: &JobsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (db, stores) = super::connect_stores(config).await?;
    let users = UserService::new(&stores, config.reminders.clone());
    let jobs = JobService::new(&stores, config.billing.free_job_limit);

    let result = async {
        let email = match &args.command {
            JobsCommand::List { email } | JobsCommand::Followups { email } => email,
        };
        let user = users.find_by_email(email).await?;
        let ctx = RequestContext::new(user.id, user.email);

        match &args.command {
            JobsCommand::List { .. } => {
                let rows: Vec<JobRow> = jobs
                    .list_jobs(&ctx)
                    .await?
                    .iter()
                    .map(|j| JobRow {
                        id: j.job.id.to_string(),
                        company: j.job.company.clone(),
                        role: j.job.role.clone(),
                        stage: j.job.stage.to_string(),
                        last_touched: j.job.last_touched_at.format("%Y-%m-%d %H:%M").to_string(),
                    })
                    .collect();
                output::print_list(&rows, format);
            }
            JobsCommand::Followups { .. } => {
                let rows: Vec<FollowupRow> = jobs
                    .jobs_needing_followup(&ctx)
                    .await?
                    .iter()
                    .map(FollowupRow::from)
                    .collect();
                output::print_list(&rows, format);
            }
        }
        Ok::<(), AppError>(())
    }
    .await;

    db.close().await;
    result
}
