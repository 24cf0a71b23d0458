//! Reading and updating reminder settings.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use jobtrack_core::config::ReminderConfig;
use jobtrack_core::error::AppError;
use jobtrack_database::store::{SettingsStore, Stores};
use jobtrack_entity::settings::UserSettings;

use crate::context::RequestContext;
use crate::validation::validate;

/// Update payload for settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SettingsInput {
    /// Threshold for APPLIED, in days.
    #[validate(range(min = 1, max = 365, message = "must be between 1 and 365 days"))]
    pub applied_followup_days: i32,
    /// Threshold for interview stages, in days.
    #[validate(range(min = 1, max = 365, message = "must be between 1 and 365 days"))]
    pub interview_followup_days: i32,
    /// Whether reminders are generated.
    pub reminders_enabled: bool,
}

/// Manages the caller's reminder settings.
#[derive(Debug, Clone)]
pub struct SettingsService {
    settings: Arc<dyn SettingsStore>,
    defaults: ReminderConfig,
}

impl SettingsService {
    /// Creates a new settings service.
    pub fn new(stores: &Stores, defaults: ReminderConfig) -> Self {
        Self {
            settings: stores.settings.clone(),
            defaults,
        }
    }

    /// Default settings for a user without a stored row.
    pub fn defaults_for(&self, ctx: &RequestContext) -> UserSettings {
        UserSettings::with_thresholds(
            ctx.user_id,
            self.defaults.default_applied_followup_days,
            self.defaults.default_interview_followup_days,
            ctx.request_time,
        )
    }

    /// The caller's settings, falling back to defaults.
    pub async fn get_settings(&self, ctx: &RequestContext) -> Result<UserSettings, AppError> {
        Ok(self
            .settings
            .find(ctx.user_id)
            .await?
            .unwrap_or_else(|| self.defaults_for(ctx)))
    }

    /// Replace the caller's settings.
    pub async fn update_settings(
        &self,
        ctx: &RequestContext,
        input: SettingsInput,
    ) -> Result<UserSettings, AppError> {
        validate(&input)?;

        let mut settings = self.get_settings(ctx).await?;
        settings.applied_followup_days = input.applied_followup_days;
        settings.interview_followup_days = input.interview_followup_days;
        settings.reminders_enabled = input.reminders_enabled;
        settings.updated_at = ctx.request_time;

        let saved = self.settings.upsert(&settings).await?;
        info!(
            user_id = %ctx.user_id,
            applied_days = saved.applied_followup_days,
            interview_days = saved.interview_followup_days,
            enabled = saved.reminders_enabled,
            "Settings updated"
        );
        Ok(saved)
    }
}
