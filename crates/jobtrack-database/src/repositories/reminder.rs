//! Reminder repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use jobtrack_core::error::{AppError, ErrorKind};
use jobtrack_core::result::AppResult;
use jobtrack_entity::reminder::{DueReminder, Reminder};

use crate::store::ReminderStore;

/// Repository for reminder rows.
#[derive(Debug, Clone)]
pub struct ReminderRepository {
    pool: PgPool,
}

impl ReminderRepository {
    /// Create a new reminder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReminderStore for ReminderRepository {
    async fn insert_if_absent(
        &self,
        reminder: &Reminder,
        window_start: DateTime<Utc>,
    ) -> AppResult<bool> {
        // The partial unique index on pending reminders turns a concurrent
        // duplicate into a no-op instead of a second row.
        let result = sqlx::query(
            "INSERT INTO reminders (id, user_id, job_application_id, kind, trigger_at, created_at) \
             SELECT $1, $2, $3, $4, $5, $6 \
             WHERE EXISTS (SELECT 1 FROM job_applications WHERE id = $3 AND user_id = $2) \
             AND NOT EXISTS ( \
                 SELECT 1 FROM reminders \
                 WHERE job_application_id = $3 AND kind = $4 AND cancelled_at IS NULL \
                 AND (sent_at IS NULL OR trigger_at > $7)) \
             ON CONFLICT DO NOTHING",
        )
        .bind(reminder.id)
        .bind(reminder.user_id)
        .bind(reminder.job_application_id)
        .bind(reminder.kind)
        .bind(reminder.trigger_at)
        .bind(reminder.created_at)
        .bind(window_start)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to insert reminder", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_due(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<DueReminder>> {
        sqlx::query_as::<_, DueReminder>(
            "SELECT r.id AS reminder_id, r.user_id, r.job_application_id, r.trigger_at, \
                    u.email, j.company, j.role, j.stage, j.last_touched_at \
             FROM reminders r \
             JOIN job_applications j ON j.id = r.job_application_id AND j.user_id = r.user_id \
             JOIN users u ON u.id = r.user_id \
             JOIN user_entitlements e ON e.user_id = r.user_id AND e.plan = 'PAID_LIFETIME' \
             JOIN user_settings s ON s.user_id = r.user_id AND s.reminders_enabled \
             WHERE r.trigger_at <= $1 AND r.sent_at IS NULL AND r.cancelled_at IS NULL \
             ORDER BY r.trigger_at ASC \
             LIMIT $2",
        )
        .bind(now)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load due reminders", e))
    }

    async fn mark_sent(&self, reminder_id: Uuid, now: DateTime<Utc>) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE reminders SET sent_at = $2 \
             WHERE id = $1 AND sent_at IS NULL AND cancelled_at IS NULL",
        )
        .bind(reminder_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark reminder sent", e)
        })?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Reminder>> {
        sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE user_id = $1 ORDER BY trigger_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list reminders", e))
    }

    async fn list_for_job(&self, user_id: Uuid, job_id: Uuid) -> AppResult<Vec<Reminder>> {
        sqlx::query_as::<_, Reminder>(
            "SELECT * FROM reminders WHERE user_id = $1 AND job_application_id = $2 \
             ORDER BY trigger_at DESC",
        )
        .bind(user_id)
        .bind(job_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list job reminders", e)
        })
    }
}
