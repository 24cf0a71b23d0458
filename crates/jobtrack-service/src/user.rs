//! User provisioning.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use jobtrack_core::config::ReminderConfig;
use jobtrack_core::error::AppError;
use jobtrack_database::store::{Stores, UserStore};
use jobtrack_entity::settings::UserSettings;
use jobtrack_entity::user::User;

/// Creates and looks up user rows.
#[derive(Debug, Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    defaults: ReminderConfig,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(stores: &Stores, defaults: ReminderConfig) -> Self {
        Self {
            users: stores.users.clone(),
            defaults,
        }
    }

    /// Make sure a user row exists together with default settings and a
    /// FREE entitlement. Idempotent.
    pub async fn ensure_provisioned(&self, user_id: Uuid, email: &str) -> Result<User, AppError> {
        self.ensure_provisioned_at(user_id, email, Utc::now()).await
    }

    /// Same as [`UserService::ensure_provisioned`] with an explicit clock.
    pub async fn ensure_provisioned_at(
        &self,
        user_id: Uuid,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<User, AppError> {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::validation(format!("Invalid email address '{email}'")));
        }

        let user = User::new(user_id, email, now);
        let settings = UserSettings::with_thresholds(
            user_id,
            self.defaults.default_applied_followup_days,
            self.defaults.default_interview_followup_days,
            now,
        );
        let stored = self.users.ensure_provisioned(&user, &settings).await?;
        debug!(user_id = %stored.id, "User provisioned");
        Ok(stored)
    }

    /// Find a user by id.
    pub async fn get(&self, user_id: Uuid) -> Result<User, AppError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))
    }

    /// Find a user by email.
    pub async fn find_by_email(&self, email: &str) -> Result<User, AppError> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::not_found(format!("No user with email '{email}'")))
    }

    /// All users.
    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }
}
