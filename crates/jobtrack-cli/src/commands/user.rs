//! User management CLI commands.

use chrono::Duration;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use crate::output::{self, OutputFormat};
use jobtrack_auth::JwtEncoder;
use jobtrack_core::config::AppConfig;
use jobtrack_core::error::AppError;
use jobtrack_entity::user::User;
use jobtrack_service::UserService;

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Provision a user with FREE defaults
    Add {
        /// Contact email
        email: String,
        /// Identity-provider subject; generated when omitted
        #[arg(long)]
        id: Option<Uuid>,
    },
    /// Issue a bearer token for a user, for local testing
    Token {
        /// Contact email of an existing user
        email: String,
        /// Token lifetime in hours
        #[arg(long, default_value_t = 24)]
        hours: i64,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: String,
    /// Email
    email: String,
    /// Created at
    created_at: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email.clone(),
            created_at: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute user commands
pub async fn execute(
    args: &UserArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let (db, stores) = super::connect_stores(config).await?;
    let users = UserService::new(&stores, config.reminders.clone());

    let result = match &args.command {
        UserCommand::List => users.list().await.map(|list| {
            let rows: Vec<UserRow> = list.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }),
        UserCommand::Add { email, id } => users
            .ensure_provisioned(id.unwrap_or_else(Uuid::new_v4), email)
            .await
            .map(|user| {
                output::print_success(&format!("User {} provisioned as {}", user.email, user.id));
            }),
        UserCommand::Token { email, hours } => {
            issue_token(&users, config, email, *hours).await
        }
    };

    db.close().await;
    result
}

async fn issue_token(
    users: &UserService,
    config: &AppConfig,
    email: &str,
    hours: i64,
) -> Result<(), AppError> {
    if hours <= 0 {
        return Err(AppError::validation("Token lifetime must be positive"));
    }
    let user = users.find_by_email(email).await?;
    let token = JwtEncoder::new(&config.auth).issue(user.id, &user.email, Duration::hours(hours))?;
    println!("{token}");
    Ok(())
}
