//! Job application entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::stage::PipelineStage;

/// A job application tracked by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    /// Unique job identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Employer name.
    pub company: String,
    /// Role title.
    pub role: String,
    /// Location (free text).
    pub location: Option<String>,
    /// Posting URL.
    pub url: Option<String>,
    /// Current pipeline stage.
    pub stage: PipelineStage,
    /// Date the application was submitted.
    pub applied_date: Option<DateTime<Utc>>,
    /// Salary notes (free text).
    pub salary: Option<String>,
    /// Notes (free text).
    pub notes: Option<String>,
    /// Resume version sent with this application.
    pub resume_version_id: Option<Uuid>,
    /// Staleness clock: last user interaction with this record.
    pub last_touched_at: DateTime<Utc>,
    /// When the job was created.
    pub created_at: DateTime<Utc>,
    /// When the job was last updated.
    pub updated_at: DateTime<Utc>,
}

/// User-editable fields of a job application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDraft {
    /// Employer name.
    pub company: String,
    /// Role title.
    pub role: String,
    /// Location.
    pub location: Option<String>,
    /// Posting URL.
    pub url: Option<String>,
    /// Pipeline stage.
    pub stage: PipelineStage,
    /// Date the application was submitted.
    pub applied_date: Option<DateTime<Utc>>,
    /// Salary notes.
    pub salary: Option<String>,
    /// Notes.
    pub notes: Option<String>,
    /// Linked resume version.
    pub resume_version_id: Option<Uuid>,
}

impl JobApplication {
    /// Build a new job owned by `user_id`, touched at `now`.
    pub fn create(user_id: Uuid, draft: JobDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            company: draft.company,
            role: draft.role,
            location: draft.location,
            url: draft.url,
            stage: draft.stage,
            applied_date: draft.applied_date,
            salary: draft.salary,
            notes: draft.notes,
            resume_version_id: draft.resume_version_id,
            last_touched_at: now,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an edit. Any edit counts as a touch.
    pub fn apply(&mut self, draft: JobDraft, now: DateTime<Utc>) {
        self.company = draft.company;
        self.role = draft.role;
        self.location = draft.location;
        self.url = draft.url;
        self.stage = draft.stage;
        self.applied_date = draft.applied_date;
        self.salary = draft.salary;
        self.notes = draft.notes;
        self.resume_version_id = draft.resume_version_id;
        self.touch(now);
    }

    /// Refresh the staleness clock.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_touched_at = now;
        self.updated_at = now;
    }
}

/// A job joined with the name of its resume version, for listings and export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct JobWithResume {
    /// The job row.
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub job: JobApplication,
    /// Name of the linked resume version, if any.
    pub resume_name: Option<String>,
}
