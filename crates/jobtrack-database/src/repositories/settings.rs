//! User settings repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use jobtrack_core::error::{AppError, ErrorKind};
use jobtrack_core::result::AppResult;
use jobtrack_entity::settings::UserSettings;

use crate::store::SettingsStore;

/// Repository for per-user settings rows.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<UserSettings>> {
        sqlx::query_as::<_, UserSettings>("SELECT * FROM user_settings WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find settings", e))
    }

    async fn upsert(&self, settings: &UserSettings) -> AppResult<UserSettings> {
        sqlx::query_as::<_, UserSettings>(
            "INSERT INTO user_settings \
             (user_id, applied_followup_days, interview_followup_days, reminders_enabled, \
              created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT (user_id) DO UPDATE SET \
             applied_followup_days = EXCLUDED.applied_followup_days, \
             interview_followup_days = EXCLUDED.interview_followup_days, \
             reminders_enabled = EXCLUDED.reminders_enabled, \
             updated_at = EXCLUDED.updated_at \
             RETURNING *",
        )
        .bind(settings.user_id)
        .bind(settings.applied_followup_days)
        .bind(settings.interview_followup_days)
        .bind(settings.reminders_enabled)
        .bind(settings.created_at)
        .bind(settings.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to save settings", e))
    }

    async fn find_reminder_eligible(&self) -> AppResult<Vec<UserSettings>> {
        sqlx::query_as::<_, UserSettings>(
            "SELECT s.* FROM user_settings s \
             JOIN user_entitlements e ON e.user_id = s.user_id \
             WHERE s.reminders_enabled AND e.plan = 'PAID_LIFETIME' \
             ORDER BY s.user_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to load reminder-eligible users", e)
        })
    }
}
