//! Reminder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::ReminderKind;
use crate::job::PipelineStage;

/// A scheduled follow-up notification for one job application.
///
/// A reminder is pending while both `sent_at` and `cancelled_at` are unset.
/// Once either is set the reminder is final and never changes again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Reminder {
    /// Unique reminder identifier.
    pub id: Uuid,
    /// Owning user (denormalized from the job).
    pub user_id: Uuid,
    /// The job this reminder is about.
    pub job_application_id: Uuid,
    /// Reminder kind.
    pub kind: ReminderKind,
    /// Earliest instant the reminder may be dispatched.
    pub trigger_at: DateTime<Utc>,
    /// Set once the mail transport accepted the message.
    pub sent_at: Option<DateTime<Utc>>,
    /// Set when a touch made the reminder obsolete.
    pub cancelled_at: Option<DateTime<Utc>>,
    /// When the reminder was created.
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Build a pending follow-up reminder.
    pub fn follow_up(
        user_id: Uuid,
        job_application_id: Uuid,
        trigger_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            job_application_id,
            kind: ReminderKind::FollowUp,
            trigger_at,
            sent_at: None,
            cancelled_at: None,
            created_at: now,
        }
    }

    /// Neither sent nor cancelled.
    pub fn is_pending(&self) -> bool {
        self.sent_at.is_none() && self.cancelled_at.is_none()
    }

    /// Pending and due at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.is_pending() && self.trigger_at <= now
    }

    /// Whether this reminder still covers the staleness window that started
    /// at `last_touched_at`.
    ///
    /// Pending reminders always do. A sent reminder only does if it was
    /// scheduled after the last touch; otherwise the job has been touched
    /// since and a new window is open.
    pub fn covers_window(&self, last_touched_at: DateTime<Utc>) -> bool {
        if self.cancelled_at.is_some() {
            return false;
        }
        self.sent_at.is_none() || self.trigger_at > last_touched_at
    }
}

/// A due reminder joined with everything the dispatcher needs to render it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DueReminder {
    /// Reminder identifier.
    pub reminder_id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Job identifier.
    pub job_application_id: Uuid,
    /// When the reminder became due.
    pub trigger_at: DateTime<Utc>,
    /// Recipient address.
    pub email: String,
    /// Employer name.
    pub company: String,
    /// Role title.
    pub role: String,
    /// Current pipeline stage.
    pub stage: PipelineStage,
    /// Last touch of the job.
    pub last_touched_at: DateTime<Utc>,
}
