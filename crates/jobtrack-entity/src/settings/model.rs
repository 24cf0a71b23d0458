//! User settings entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Default follow-up threshold for the APPLIED stage, in days.
pub const DEFAULT_APPLIED_FOLLOWUP_DAYS: i32 = 7;

/// Default follow-up threshold for interview stages, in days.
pub const DEFAULT_INTERVIEW_FOLLOWUP_DAYS: i32 = 5;

/// Reminder preferences, one row per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSettings {
    /// Owning user.
    pub user_id: Uuid,
    /// Threshold for jobs in APPLIED.
    pub applied_followup_days: i32,
    /// Threshold for jobs in RECRUITER_SCREEN, TECHNICAL, or ONSITE.
    pub interview_followup_days: i32,
    /// Whether follow-up reminders are generated for this user.
    pub reminders_enabled: bool,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    /// Settings with the stock thresholds and reminders enabled.
    pub fn defaults_for(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self::with_thresholds(
            user_id,
            DEFAULT_APPLIED_FOLLOWUP_DAYS,
            DEFAULT_INTERVIEW_FOLLOWUP_DAYS,
            now,
        )
    }

    /// Settings with explicit thresholds and reminders enabled.
    pub fn with_thresholds(
        user_id: Uuid,
        applied_followup_days: i32,
        interview_followup_days: i32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id,
            applied_followup_days,
            interview_followup_days,
            reminders_enabled: true,
            created_at: now,
            updated_at: now,
        }
    }
}
