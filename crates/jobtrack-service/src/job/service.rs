//! Job application CRUD, touch, and the follow-up view.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use jobtrack_core::error::AppError;
use jobtrack_database::store::{
    EntitlementStore, JobStore, ReminderStore, ResumeStore, SettingsStore, Stores,
};
use jobtrack_entity::job::{JobApplication, JobDraft, JobWithResume, PipelineStage};
use jobtrack_entity::reminder::Reminder;

use crate::context::RequestContext;
use crate::reminder::policy::{self, FollowupThresholds};
use crate::validation::{non_blank, validate};

/// Create or update payload for a job application.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct JobInput {
    /// Employer name.
    #[validate(length(min = 1, max = 160, message = "must be 1-160 characters"))]
    pub company: String,
    /// Role title.
    #[validate(length(min = 1, max = 160, message = "must be 1-160 characters"))]
    pub role: String,
    /// Location.
    #[serde(default)]
    #[validate(length(max = 160, message = "must be at most 160 characters"))]
    pub location: Option<String>,
    /// Posting URL; blank is accepted and stored as absent.
    #[serde(default)]
    #[validate(url(message = "must be a valid URL"))]
    pub url: Option<String>,
    /// Pipeline stage.
    #[serde(default, alias = "status")]
    pub stage: PipelineStage,
    /// Date the application was submitted.
    #[serde(default)]
    pub applied_date: Option<DateTime<Utc>>,
    /// Salary notes.
    #[serde(default)]
    #[validate(length(max = 100, message = "must be at most 100 characters"))]
    pub salary: Option<String>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Linked resume version.
    #[serde(default)]
    pub resume_version_id: Option<Uuid>,
}

impl JobInput {
    fn normalized(self) -> Self {
        Self {
            company: self.company.trim().to_string(),
            role: self.role.trim().to_string(),
            location: non_blank(self.location),
            url: non_blank(self.url),
            salary: non_blank(self.salary),
            notes: non_blank(self.notes),
            ..self
        }
    }

    fn into_draft(self) -> JobDraft {
        JobDraft {
            company: self.company,
            role: self.role,
            location: self.location,
            url: self.url,
            stage: self.stage,
            applied_date: self.applied_date,
            salary: self.salary,
            notes: self.notes,
            resume_version_id: self.resume_version_id,
        }
    }
}

/// A job that is due for follow-up, as shown in the "needs follow-up" view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowupItem {
    /// The job.
    #[serde(flatten)]
    pub job: JobApplication,
    /// Whole days since the last touch.
    pub days_since_touch: i64,
    /// Threshold that made the job due.
    pub threshold_days: i32,
    /// When the job became stale.
    pub stale_since: Option<DateTime<Utc>>,
}

/// Owns job records and the staleness clock.
#[derive(Debug, Clone)]
pub struct JobService {
    jobs: Arc<dyn JobStore>,
    resumes: Arc<dyn ResumeStore>,
    settings: Arc<dyn SettingsStore>,
    entitlements: Arc<dyn EntitlementStore>,
    reminders: Arc<dyn ReminderStore>,
    free_job_limit: i64,
}

impl JobService {
    /// Creates a new job service.
    pub fn new(stores: &Stores, free_job_limit: i64) -> Self {
        Self {
            jobs: stores.jobs.clone(),
            resumes: stores.resumes.clone(),
            settings: stores.settings.clone(),
            entitlements: stores.entitlements.clone(),
            reminders: stores.reminders.clone(),
            free_job_limit,
        }
    }

    /// Lists the caller's jobs, most recently touched first.
    pub async fn list_jobs(&self, ctx: &RequestContext) -> Result<Vec<JobWithResume>, AppError> {
        self.jobs.list_for_user(ctx.user_id).await
    }

    /// Gets one of the caller's jobs.
    pub async fn get_job(
        &self,
        ctx: &RequestContext,
        job_id: Uuid,
    ) -> Result<JobApplication, AppError> {
        self.jobs
            .find_for_user(ctx.user_id, job_id)
            .await?
            .ok_or_else(|| AppError::not_found("Job not found"))
    }

    /// Creates a job stamped with the request time.
    pub async fn create_job(
        &self,
        ctx: &RequestContext,
        input: JobInput,
    ) -> Result<JobApplication, AppError> {
        self.create_job_at(ctx, input, ctx.request_time).await
    }

    /// Creates a job touched at `now`.
    ///
    /// FREE users are limited to the configured number of jobs.
    pub async fn create_job_at(
        &self,
        ctx: &RequestContext,
        input: JobInput,
        now: DateTime<Utc>,
    ) -> Result<JobApplication, AppError> {
        let input = input.normalized();
        validate(&input)?;
        self.require_owned_resume(ctx, input.resume_version_id).await?;

        let is_paid = self
            .entitlements
            .find(ctx.user_id)
            .await?
            .is_some_and(|e| e.is_paid());
        if !is_paid {
            let count = self.jobs.count_for_user(ctx.user_id).await?;
            if count >= self.free_job_limit {
                return Err(AppError::conflict(format!(
                    "Free plan is limited to {} job applications. Upgrade to add more.",
                    self.free_job_limit
                )));
            }
        }

        let job = JobApplication::create(ctx.user_id, input.into_draft(), now);
        let job = self.jobs.insert(&job).await?;

        info!(user_id = %ctx.user_id, job_id = %job.id, stage = %job.stage, "Job created");
        Ok(job)
    }

    /// Updates a job stamped with the request time.
    pub async fn update_job(
        &self,
        ctx: &RequestContext,
        job_id: Uuid,
        input: JobInput,
    ) -> Result<JobApplication, AppError> {
        self.update_job_at(ctx, job_id, input, ctx.request_time).await
    }

    /// Updates a job. Any edit refreshes `last_touched_at` but leaves
    /// pending reminders alone; use [`JobService::touch`] to cancel them.
    pub async fn update_job_at(
        &self,
        ctx: &RequestContext,
        job_id: Uuid,
        input: JobInput,
        now: DateTime<Utc>,
    ) -> Result<JobApplication, AppError> {
        let input = input.normalized();
        validate(&input)?;
        self.require_owned_resume(ctx, input.resume_version_id).await?;

        let mut job = self.get_job(ctx, job_id).await?;
        let previous_stage = job.stage;
        job.apply(input.into_draft(), now);

        let job = self
            .jobs
            .update(&job)
            .await?
            .ok_or_else(|| AppError::not_found("Job not found"))?;

        if previous_stage != job.stage {
            info!(
                user_id = %ctx.user_id,
                job_id = %job.id,
                from = %previous_stage,
                to = %job.stage,
                "Job stage changed"
            );
        }
        Ok(job)
    }

    /// Deletes a job and, with it, its reminders.
    pub async fn delete_job(&self, ctx: &RequestContext, job_id: Uuid) -> Result<(), AppError> {
        if !self.jobs.delete(ctx.user_id, job_id).await? {
            return Err(AppError::not_found("Job not found"));
        }
        info!(user_id = %ctx.user_id, job_id = %job_id, "Job deleted");
        Ok(())
    }

    /// Marks a job as contacted at the request time.
    pub async fn touch(
        &self,
        ctx: &RequestContext,
        job_id: Uuid,
    ) -> Result<JobApplication, AppError> {
        self.touch_at(ctx, job_id, ctx.request_time).await
    }

    /// Marks a job as contacted: refreshes `last_touched_at` to `now` and
    /// cancels every pending reminder of the job.
    pub async fn touch_at(
        &self,
        ctx: &RequestContext,
        job_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<JobApplication, AppError> {
        let outcome = self
            .jobs
            .touch(ctx.user_id, job_id, now)
            .await?
            .ok_or_else(|| AppError::not_found("Job not found"))?;

        info!(
            user_id = %ctx.user_id,
            job_id = %job_id,
            cancelled_reminders = outcome.cancelled_reminders,
            "Job marked as contacted"
        );
        Ok(outcome.job)
    }

    /// Reminders of one of the caller's jobs.
    pub async fn list_job_reminders(
        &self,
        ctx: &RequestContext,
        job_id: Uuid,
    ) -> Result<Vec<Reminder>, AppError> {
        self.get_job(ctx, job_id).await?;
        self.reminders.list_for_job(ctx.user_id, job_id).await
    }

    /// All of the caller's reminders.
    pub async fn list_reminders(&self, ctx: &RequestContext) -> Result<Vec<Reminder>, AppError> {
        self.reminders.list_for_user(ctx.user_id).await
    }

    /// The caller's jobs that are due for follow-up at the request time.
    pub async fn jobs_needing_followup(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<FollowupItem>, AppError> {
        self.jobs_needing_followup_at(ctx, ctx.request_time).await
    }

    /// The caller's jobs that are due for follow-up at `now`, most overdue
    /// first. Uses the same policy as reminder generation.
    pub async fn jobs_needing_followup_at(
        &self,
        ctx: &RequestContext,
        now: DateTime<Utc>,
    ) -> Result<Vec<FollowupItem>, AppError> {
        let Some(settings) = self.settings.find(ctx.user_id).await? else {
            return Ok(Vec::new());
        };
        let thresholds = FollowupThresholds::from(&settings);

        let mut items: Vec<FollowupItem> = self
            .jobs
            .list_active_for_user(ctx.user_id)
            .await?
            .into_iter()
            .filter_map(|job| {
                let decision = policy::evaluate(job.stage, job.last_touched_at, now, thresholds);
                decision.due.then(|| FollowupItem {
                    days_since_touch: decision.elapsed_days,
                    threshold_days: decision.threshold_days_used,
                    stale_since: decision.trigger_at,
                    job,
                })
            })
            .collect();
        items.sort_by(|a, b| b.days_since_touch.cmp(&a.days_since_touch));
        Ok(items)
    }

    async fn require_owned_resume(
        &self,
        ctx: &RequestContext,
        resume_id: Option<Uuid>,
    ) -> Result<(), AppError> {
        let Some(resume_id) = resume_id else {
            return Ok(());
        };
        self.resumes
            .find_for_user(ctx.user_id, resume_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Resume version not found"))
    }
}
