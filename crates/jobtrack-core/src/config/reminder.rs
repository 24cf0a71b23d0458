//! Reminder engine configuration.

use serde::{Deserialize, Serialize};

/// Reminder generation and dispatch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderConfig {
    /// Maximum number of due reminders delivered per dispatch run.
    #[serde(default = "default_batch_size")]
    pub dispatch_batch_size: i64,
    /// Default APPLIED threshold for newly provisioned users.
    #[serde(default = "default_applied_days")]
    pub default_applied_followup_days: i32,
    /// Default interview-stage threshold for newly provisioned users.
    #[serde(default = "default_interview_days")]
    pub default_interview_followup_days: i32,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            dispatch_batch_size: default_batch_size(),
            default_applied_followup_days: default_applied_days(),
            default_interview_followup_days: default_interview_days(),
        }
    }
}

fn default_batch_size() -> i64 {
    100
}

fn default_applied_days() -> i32 {
    7
}

fn default_interview_days() -> i32 {
    5
}
