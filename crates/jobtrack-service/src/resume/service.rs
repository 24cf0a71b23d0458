//! Resume version CRUD with a reference guard on delete.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use jobtrack_core::error::AppError;
use jobtrack_database::store::{JobStore, ResumeStore, Stores};
use jobtrack_entity::resume::ResumeVersion;

use crate::context::RequestContext;
use crate::validation::validate;

/// Create or update payload for a resume version.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResumeInput {
    /// Display name.
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub name: String,
    /// Document location.
    #[validate(url(message = "must be a valid URL"))]
    pub url: String,
}

impl ResumeInput {
    fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
        }
    }
}

/// Manages the caller's resume versions.
#[derive(Debug, Clone)]
pub struct ResumeService {
    resumes: Arc<dyn ResumeStore>,
    jobs: Arc<dyn JobStore>,
}

impl ResumeService {
    /// Creates a new resume service.
    pub fn new(stores: &Stores) -> Self {
        Self {
            resumes: stores.resumes.clone(),
            jobs: stores.jobs.clone(),
        }
    }

    /// Lists the caller's resume versions, newest first.
    pub async fn list_resumes(&self, ctx: &RequestContext) -> Result<Vec<ResumeVersion>, AppError> {
        self.resumes.list_for_user(ctx.user_id).await
    }

    /// Creates a resume version.
    pub async fn create_resume(
        &self,
        ctx: &RequestContext,
        input: ResumeInput,
    ) -> Result<ResumeVersion, AppError> {
        self.create_resume_at(ctx, input, ctx.request_time).await
    }

    /// Creates a resume version stamped at `now`.
    pub async fn create_resume_at(
        &self,
        ctx: &RequestContext,
        input: ResumeInput,
        now: DateTime<Utc>,
    ) -> Result<ResumeVersion, AppError> {
        let input = input.normalized();
        validate(&input)?;

        let resume = ResumeVersion::create(ctx.user_id, input.name, input.url, now);
        let resume = self.resumes.insert(&resume).await?;
        info!(user_id = %ctx.user_id, resume_id = %resume.id, "Resume version created");
        Ok(resume)
    }

    /// Renames or re-points a resume version.
    pub async fn update_resume(
        &self,
        ctx: &RequestContext,
        resume_id: Uuid,
        input: ResumeInput,
    ) -> Result<ResumeVersion, AppError> {
        let input = input.normalized();
        validate(&input)?;

        let mut resume = self
            .resumes
            .find_for_user(ctx.user_id, resume_id)
            .await?
            .ok_or_else(|| AppError::not_found("Resume version not found"))?;
        resume.name = input.name;
        resume.url = input.url;
        resume.updated_at = ctx.request_time;

        self.resumes
            .update(&resume)
            .await?
            .ok_or_else(|| AppError::not_found("Resume version not found"))
    }

    /// Deletes a resume version that no job references.
    pub async fn delete_resume(
        &self,
        ctx: &RequestContext,
        resume_id: Uuid,
    ) -> Result<(), AppError> {
        if self
            .resumes
            .find_for_user(ctx.user_id, resume_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found("Resume version not found"));
        }

        let references = self
            .jobs
            .count_referencing_resume(ctx.user_id, resume_id)
            .await?;
        if references > 0 {
            return Err(AppError::conflict(format!(
                "Resume version is used by {references} job application(s); unlink it first"
            )));
        }

        if !self.resumes.delete(ctx.user_id, resume_id).await? {
            return Err(AppError::not_found("Resume version not found"));
        }
        info!(user_id = %ctx.user_id, resume_id = %resume_id, "Resume version deleted");
        Ok(())
    }
}
