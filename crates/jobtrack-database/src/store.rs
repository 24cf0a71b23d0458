//! Store contracts consumed by the service layer.
//!
//! Every method that addresses a user-owned row takes the owning user id
//! and filters on it. A filter that matches nothing is reported as
//! `Ok(None)` or `Ok(false)`, never as an error; the service layer turns
//! that into `NotFound`.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use jobtrack_core::result::AppResult;
use jobtrack_entity::entitlement::{Plan, UserEntitlement};
use jobtrack_entity::job::{JobApplication, JobWithResume};
use jobtrack_entity::reminder::{DueReminder, Reminder};
use jobtrack_entity::resume::ResumeVersion;
use jobtrack_entity::settings::UserSettings;
use jobtrack_entity::user::User;

use crate::memory::MemoryStore;
use crate::repositories::{
    EntitlementRepository, JobRepository, ReminderRepository, ResumeRepository,
    SettingsRepository, UserRepository,
};

/// Result of touching a job.
#[derive(Debug, Clone)]
pub struct TouchOutcome {
    /// The job after the touch.
    pub job: JobApplication,
    /// Number of pending reminders cancelled by the touch.
    pub cancelled_reminders: u64,
}

/// User identity records.
#[async_trait]
pub trait UserStore: Send + Sync + Debug + 'static {
    /// Find a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// List all users, oldest first.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// Insert the user with the given default settings and a FREE
    /// entitlement unless they already exist. Returns the stored user.
    async fn ensure_provisioned(&self, user: &User, settings: &UserSettings) -> AppResult<User>;
}

/// Job application records.
#[async_trait]
pub trait JobStore: Send + Sync + Debug + 'static {
    /// All jobs of a user with their resume name, most recently touched first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<JobWithResume>>;

    /// Jobs of a user in one of the active stages.
    async fn list_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<JobApplication>>;

    /// One job, if it exists and belongs to the user.
    async fn find_for_user(&self, user_id: Uuid, job_id: Uuid)
    -> AppResult<Option<JobApplication>>;

    /// Number of jobs the user owns.
    async fn count_for_user(&self, user_id: Uuid) -> AppResult<i64>;

    /// Number of the user's jobs linked to a resume version.
    async fn count_referencing_resume(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<i64>;

    /// Insert a new job.
    async fn insert(&self, job: &JobApplication) -> AppResult<JobApplication>;

    /// Overwrite the editable fields and timestamps of an owned job.
    async fn update(&self, job: &JobApplication) -> AppResult<Option<JobApplication>>;

    /// Delete an owned job together with its reminders.
    async fn delete(&self, user_id: Uuid, job_id: Uuid) -> AppResult<bool>;

    /// Refresh `last_touched_at` and cancel the job's pending reminders in
    /// one unit of work.
    async fn touch(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<TouchOutcome>>;
}

/// Resume version records.
#[async_trait]
pub trait ResumeStore: Send + Sync + Debug + 'static {
    /// All resume versions of a user, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<ResumeVersion>>;

    /// One resume version, if owned by the user.
    async fn find_for_user(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> AppResult<Option<ResumeVersion>>;

    /// Insert a new resume version.
    async fn insert(&self, resume: &ResumeVersion) -> AppResult<ResumeVersion>;

    /// Overwrite name and url of an owned resume version.
    async fn update(&self, resume: &ResumeVersion) -> AppResult<Option<ResumeVersion>>;

    /// Delete an owned resume version.
    async fn delete(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<bool>;
}

/// Per-user reminder settings.
#[async_trait]
pub trait SettingsStore: Send + Sync + Debug + 'static {
    /// Settings of a user, if a row exists.
    async fn find(&self, user_id: Uuid) -> AppResult<Option<UserSettings>>;

    /// Insert or replace the settings row.
    async fn upsert(&self, settings: &UserSettings) -> AppResult<UserSettings>;

    /// Settings of every user with reminders enabled and a paid plan.
    async fn find_reminder_eligible(&self) -> AppResult<Vec<UserSettings>>;
}

/// Billing-derived plans.
#[async_trait]
pub trait EntitlementStore: Send + Sync + Debug + 'static {
    /// Entitlement row of a user, if any.
    async fn find(&self, user_id: Uuid) -> AppResult<Option<UserEntitlement>>;

    /// Insert or update the plan of a user.
    async fn set_plan(
        &self,
        user_id: Uuid,
        plan: Plan,
        now: DateTime<Utc>,
    ) -> AppResult<UserEntitlement>;
}

/// Reminder records.
#[async_trait]
pub trait ReminderStore: Send + Sync + Debug + 'static {
    /// Insert `reminder` unless the job already has a reminder of the same
    /// kind covering the window that started at `window_start`, or the job
    /// does not belong to the reminder's user. Check and insert are atomic.
    /// Returns whether a row was inserted.
    async fn insert_if_absent(
        &self,
        reminder: &Reminder,
        window_start: DateTime<Utc>,
    ) -> AppResult<bool>;

    /// Pending reminders with `trigger_at <= now` of users who still have
    /// reminders enabled on a paid plan, oldest trigger first, at most `limit`.
    async fn find_due(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<DueReminder>>;

    /// Set `sent_at` if the reminder is still pending.
    async fn mark_sent(&self, reminder_id: Uuid, now: DateTime<Utc>) -> AppResult<bool>;

    /// All reminders of a user, latest trigger first.
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Reminder>>;

    /// All reminders of one owned job, latest trigger first.
    async fn list_for_job(&self, user_id: Uuid, job_id: Uuid) -> AppResult<Vec<Reminder>>;
}

/// The full set of stores, shared by services.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Users.
    pub users: Arc<dyn UserStore>,
    /// Job applications.
    pub jobs: Arc<dyn JobStore>,
    /// Resume versions.
    pub resumes: Arc<dyn ResumeStore>,
    /// Settings.
    pub settings: Arc<dyn SettingsStore>,
    /// Entitlements.
    pub entitlements: Arc<dyn EntitlementStore>,
    /// Reminders.
    pub reminders: Arc<dyn ReminderStore>,
}

impl Stores {
    /// Stores backed by PostgreSQL.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            users: Arc::new(UserRepository::new(pool.clone())),
            jobs: Arc::new(JobRepository::new(pool.clone())),
            resumes: Arc::new(ResumeRepository::new(pool.clone())),
            settings: Arc::new(SettingsRepository::new(pool.clone())),
            entitlements: Arc::new(EntitlementRepository::new(pool.clone())),
            reminders: Arc::new(ReminderRepository::new(pool)),
        }
    }

    /// Stores backed by a single shared in-memory store.
    pub fn in_memory() -> Self {
        Self::from_memory(Arc::new(MemoryStore::new()))
    }

    /// Stores backed by an existing in-memory store, so callers can keep a
    /// handle for inspection.
    pub fn from_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            jobs: store.clone(),
            resumes: store.clone(),
            settings: store.clone(),
            entitlements: store.clone(),
            reminders: store,
        }
    }
}
