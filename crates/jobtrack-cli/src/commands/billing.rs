//! Plan management commands, for support and manual upgrades.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use jobtrack_core::config::AppConfig;
use jobtrack_core::error::AppError;
use jobtrack_entity::entitlement::Plan;
use jobtrack_service::{EntitlementService, UserService};

/// Arguments for billing commands
#[derive(Debug, Args)]
pub struct BillingArgs {
    /// Billing subcommand
    #[command(subcommand)]
    pub command: BillingCommand,
}

/// Billing subcommands
#[derive(Debug, Subcommand)]
pub enum BillingCommand {
    /// Show a user's plan
    Show {
        /// Contact email
        email: String,
    },
    /// Grant the lifetime plan
    Upgrade {
        /// Contact email
        email: String,
    },
    /// Set a plan explicitly (FREE or PAID_LIFETIME)
    SetPlan {
        /// Contact email
        email: String,
        /// Target plan
        plan: Plan,
    },
}

/// Execute billing commands
pub async fn execute(
    args: &BillingArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (db, stores) = super::connect_stores(config).await?;
    let users = UserService::new(&stores, config.reminders.clone());
    let entitlements = EntitlementService::new(&stores);

    let result = async {
        match &args.command {
            BillingCommand::Show { email } => {
                let user = users.find_by_email(email).await?;
                let view = entitlements.get_entitlement(user.id).await?;
                output::print_report(&view, format);
            }
            BillingCommand::Upgrade { email } => {
                let user = users.find_by_email(email).await?;
                entitlements.upgrade_to_paid_lifetime(user.id).await?;
                output::print_success(&format!("{email} is now {}", Plan::PaidLifetime));
            }
            BillingCommand::SetPlan { email, plan } => {
                let user = users.find_by_email(email).await?;
                entitlements.set_plan(user.id, *plan).await?;
                output::print_success(&format!("{email} is now {plan}"));
            }
        }
        Ok::<(), AppError>(())
    }
    .await;

    db.close().await;
    result
}
