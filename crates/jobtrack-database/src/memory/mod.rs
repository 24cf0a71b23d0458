//! In-memory implementation of every store contract.
//!
//! All records live behind one `RwLock`, so each trait method is a single
//! atomic unit of work, matching the transactional guarantees of the
//! PostgreSQL repositories.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use jobtrack_core::error::AppError;
use jobtrack_core::result::AppResult;
use jobtrack_entity::entitlement::{Plan, UserEntitlement};
use jobtrack_entity::job::{JobApplication, JobWithResume};
use jobtrack_entity::reminder::{DueReminder, Reminder};
use jobtrack_entity::resume::ResumeVersion;
use jobtrack_entity::settings::UserSettings;
use jobtrack_entity::user::User;

use crate::store::{
    EntitlementStore, JobStore, ReminderStore, ResumeStore, SettingsStore, TouchOutcome,
    UserStore,
};

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, User>,
    jobs: HashMap<Uuid, JobApplication>,
    resumes: HashMap<Uuid, ResumeVersion>,
    settings: HashMap<Uuid, UserSettings>,
    entitlements: HashMap<Uuid, UserEntitlement>,
    reminders: Vec<Reminder>,
}

impl State {
    fn owned_job(&self, user_id: Uuid, job_id: Uuid) -> Option<&JobApplication> {
        self.jobs.get(&job_id).filter(|j| j.user_id == user_id)
    }

    fn is_paid(&self, user_id: Uuid) -> bool {
        self.entitlements
            .get(&user_id)
            .is_some_and(UserEntitlement::is_paid)
    }

    fn reminders_enabled(&self, user_id: Uuid) -> bool {
        self.settings
            .get(&user_id)
            .is_some_and(|s| s.reminders_enabled)
    }
}

/// Process-local store used by tests and `server.in_memory` runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every reminder across all users, in insertion order.
    pub async fn all_reminders(&self) -> Vec<Reminder> {
        self.state.read().await.reminders.clone()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .filter(|u| u.email.eq_ignore_ascii_case(email))
            .min_by_key(|u| u.created_at)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.state.read().await.users.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn ensure_provisioned(&self, user: &User, settings: &UserSettings) -> AppResult<User> {
        let mut state = self.state.write().await;
        let stored = state.users.entry(user.id).or_insert_with(|| user.clone()).clone();
        state
            .settings
            .entry(user.id)
            .or_insert_with(|| settings.clone());
        state
            .entitlements
            .entry(user.id)
            .or_insert_with(|| UserEntitlement::free(user.id, user.created_at));
        Ok(stored)
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<JobWithResume>> {
        let state = self.state.read().await;
        let mut jobs: Vec<JobWithResume> = state
            .jobs
            .values()
            .filter(|j| j.user_id == user_id)
            .map(|j| JobWithResume {
                resume_name: j
                    .resume_version_id
                    .and_then(|id| state.resumes.get(&id))
                    .map(|r| r.name.clone()),
                job: j.clone(),
            })
            .collect();
        jobs.sort_by(|a, b| b.job.last_touched_at.cmp(&a.job.last_touched_at));
        Ok(jobs)
    }

    async fn list_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<JobApplication>> {
        let state = self.state.read().await;
        let mut jobs: Vec<JobApplication> = state
            .jobs
            .values()
            .filter(|j| j.user_id == user_id && j.stage.is_active())
            .cloned()
            .collect();
        jobs.sort_by_key(|j| j.last_touched_at);
        Ok(jobs)
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> AppResult<Option<JobApplication>> {
        Ok(self.state.read().await.owned_job(user_id, job_id).cloned())
    }

    async fn count_for_user(&self, user_id: Uuid) -> AppResult<i64> {
        let state = self.state.read().await;
        Ok(state.jobs.values().filter(|j| j.user_id == user_id).count() as i64)
    }

    async fn count_referencing_resume(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<i64> {
        let state = self.state.read().await;
        Ok(state
            .jobs
            .values()
            .filter(|j| j.user_id == user_id && j.resume_version_id == Some(resume_id))
            .count() as i64)
    }

    async fn insert(&self, job: &JobApplication) -> AppResult<JobApplication> {
        let mut state = self.state.write().await;
        if let Some(resume_id) = job.resume_version_id {
            if !state.resumes.contains_key(&resume_id) {
                return Err(AppError::validation("Resume version does not exist"));
            }
        }
        if state.jobs.contains_key(&job.id) {
            return Err(AppError::conflict(format!("Job {} already exists", job.id)));
        }
        state.jobs.insert(job.id, job.clone());
        Ok(job.clone())
    }

    async fn update(&self, job: &JobApplication) -> AppResult<Option<JobApplication>> {
        let mut state = self.state.write().await;
        if let Some(resume_id) = job.resume_version_id {
            if !state.resumes.contains_key(&resume_id) {
                return Err(AppError::validation("Resume version does not exist"));
            }
        }
        let Some(existing) = state
            .jobs
            .get_mut(&job.id)
            .filter(|j| j.user_id == job.user_id)
        else {
            return Ok(None);
        };
        let last_touched_at = existing.last_touched_at.max(job.last_touched_at);
        *existing = JobApplication {
            last_touched_at,
            created_at: existing.created_at,
            ..job.clone()
        };
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, user_id: Uuid, job_id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.owned_job(user_id, job_id).is_none() {
            return Ok(false);
        }
        state.jobs.remove(&job_id);
        state.reminders.retain(|r| r.job_application_id != job_id);
        Ok(true)
    }

    async fn touch(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<TouchOutcome>> {
        let mut state = self.state.write().await;
        let Some(job) = state
            .jobs
            .get_mut(&job_id)
            .filter(|j| j.user_id == user_id)
        else {
            return Ok(None);
        };
        job.last_touched_at = job.last_touched_at.max(now);
        job.updated_at = now;
        let job = job.clone();

        let mut cancelled = 0;
        for reminder in state
            .reminders
            .iter_mut()
            .filter(|r| r.job_application_id == job_id && r.user_id == user_id && r.is_pending())
        {
            reminder.cancelled_at = Some(now);
            cancelled += 1;
        }

        Ok(Some(TouchOutcome {
            job,
            cancelled_reminders: cancelled,
        }))
    }
}

#[async_trait]
impl ResumeStore for MemoryStore {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<ResumeVersion>> {
        let state = self.state.read().await;
        let mut resumes: Vec<ResumeVersion> = state
            .resumes
            .values()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        resumes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(resumes)
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> AppResult<Option<ResumeVersion>> {
        let state = self.state.read().await;
        Ok(state
            .resumes
            .get(&resume_id)
            .filter(|r| r.user_id == user_id)
            .cloned())
    }

    async fn insert(&self, resume: &ResumeVersion) -> AppResult<ResumeVersion> {
        let mut state = self.state.write().await;
        state.resumes.insert(resume.id, resume.clone());
        Ok(resume.clone())
    }

    async fn update(&self, resume: &ResumeVersion) -> AppResult<Option<ResumeVersion>> {
        let mut state = self.state.write().await;
        let Some(existing) = state
            .resumes
            .get_mut(&resume.id)
            .filter(|r| r.user_id == resume.user_id)
        else {
            return Ok(None);
        };
        existing.name = resume.name.clone();
        existing.url = resume.url.clone();
        existing.updated_at = resume.updated_at;
        Ok(Some(existing.clone()))
    }

    async fn delete(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state
            .resumes
            .get(&resume_id)
            .is_some_and(|r| r.user_id == user_id)
        {
            return Ok(false);
        }
        if state
            .jobs
            .values()
            .any(|j| j.resume_version_id == Some(resume_id))
        {
            return Err(AppError::conflict(
                "Resume version is still referenced by job applications",
            ));
        }
        state.resumes.remove(&resume_id);
        Ok(true)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<UserSettings>> {
        Ok(self.state.read().await.settings.get(&user_id).cloned())
    }

    async fn upsert(&self, settings: &UserSettings) -> AppResult<UserSettings> {
        let mut state = self.state.write().await;
        let stored = match state.settings.get(&settings.user_id) {
            Some(existing) => UserSettings {
                created_at: existing.created_at,
                ..settings.clone()
            },
            None => settings.clone(),
        };
        state.settings.insert(settings.user_id, stored.clone());
        Ok(stored)
    }

    async fn find_reminder_eligible(&self) -> AppResult<Vec<UserSettings>> {
        let state = self.state.read().await;
        let mut eligible: Vec<UserSettings> = state
            .settings
            .values()
            .filter(|s| s.reminders_enabled && state.is_paid(s.user_id))
            .cloned()
            .collect();
        eligible.sort_by_key(|s| s.user_id);
        Ok(eligible)
    }
}

#[async_trait]
impl EntitlementStore for MemoryStore {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<UserEntitlement>> {
        Ok(self.state.read().await.entitlements.get(&user_id).cloned())
    }

    async fn set_plan(
        &self,
        user_id: Uuid,
        plan: Plan,
        now: DateTime<Utc>,
    ) -> AppResult<UserEntitlement> {
        let mut state = self.state.write().await;
        if !state.users.contains_key(&user_id) {
            return Err(AppError::not_found(format!("User {user_id} not found")));
        }
        let entitlement = state
            .entitlements
            .entry(user_id)
            .or_insert_with(|| UserEntitlement::free(user_id, now));
        entitlement.plan = plan;
        entitlement.updated_at = now;
        Ok(entitlement.clone())
    }
}

#[async_trait]
impl ReminderStore for MemoryStore {
    async fn insert_if_absent(
        &self,
        reminder: &Reminder,
        window_start: DateTime<Utc>,
    ) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state
            .owned_job(reminder.user_id, reminder.job_application_id)
            .is_none()
        {
            return Ok(false);
        }
        let covered = state.reminders.iter().any(|r| {
            r.job_application_id == reminder.job_application_id
                && r.kind == reminder.kind
                && r.covers_window(window_start)
        });
        if covered {
            return Ok(false);
        }
        state.reminders.push(reminder.clone());
        Ok(true)
    }

    async fn find_due(&self, now: DateTime<Utc>, limit: i64) -> AppResult<Vec<DueReminder>> {
        let state = self.state.read().await;
        let mut due: Vec<DueReminder> = state
            .reminders
            .iter()
            .filter(|r| r.is_due(now))
            .filter(|r| state.is_paid(r.user_id) && state.reminders_enabled(r.user_id))
            .filter_map(|r| {
                let job = state.owned_job(r.user_id, r.job_application_id)?;
                let user = state.users.get(&r.user_id)?;
                Some(DueReminder {
                    reminder_id: r.id,
                    user_id: r.user_id,
                    job_application_id: r.job_application_id,
                    trigger_at: r.trigger_at,
                    email: user.email.clone(),
                    company: job.company.clone(),
                    role: job.role.clone(),
                    stage: job.stage,
                    last_touched_at: job.last_touched_at,
                })
            })
            .collect();
        due.sort_by_key(|d| d.trigger_at);
        due.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(due)
    }

    async fn mark_sent(&self, reminder_id: Uuid, now: DateTime<Utc>) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state
            .reminders
            .iter_mut()
            .find(|r| r.id == reminder_id && r.is_pending())
        {
            Some(reminder) => {
                reminder.sent_at = Some(now);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Reminder>> {
        let state = self.state.read().await;
        let mut reminders: Vec<Reminder> = state
            .reminders
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        reminders.sort_by(|a, b| b.trigger_at.cmp(&a.trigger_at));
        Ok(reminders)
    }

    async fn list_for_job(&self, user_id: Uuid, job_id: Uuid) -> AppResult<Vec<Reminder>> {
        let state = self.state.read().await;
        let mut reminders: Vec<Reminder> = state
            .reminders
            .iter()
            .filter(|r| r.user_id == user_id && r.job_application_id == job_id)
            .cloned()
            .collect();
        reminders.sort_by(|a, b| b.trigger_at.cmp(&a.trigger_at));
        Ok(reminders)
    }
}
