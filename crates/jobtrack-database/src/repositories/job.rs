//! Job application repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use jobtrack_core::error::{AppError, ErrorKind};
use jobtrack_core::result::AppResult;
use jobtrack_entity::job::{JobApplication, JobWithResume};

use crate::store::{JobStore, TouchOutcome};

const ACTIVE_STAGE_FILTER: &str = "stage IN ('APPLIED', 'RECRUITER_SCREEN', 'TECHNICAL', 'ONSITE')";

/// Repository for job application rows.
#[derive(Debug, Clone)]
pub struct JobRepository {
    pool: PgPool,
}

impl JobRepository {
    /// Create a new job repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(e: sqlx::Error, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("job_applications_resume_version_id_fkey") =>
        {
            AppError::validation("Resume version does not exist")
        }
        other => {
            AppError::with_source(ErrorKind::Database, format!("Failed to {action} job"), other)
        }
    }
}

#[async_trait]
impl JobStore for JobRepository {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<JobWithResume>> {
        sqlx::query_as::<_, JobWithResume>(
            "SELECT j.*, r.name AS resume_name FROM job_applications j \
             LEFT JOIN resume_versions r ON r.id = j.resume_version_id \
             WHERE j.user_id = $1 ORDER BY j.last_touched_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list jobs", e))
    }

    async fn list_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<JobApplication>> {
        let sql = format!(
            "SELECT * FROM job_applications WHERE user_id = $1 AND {ACTIVE_STAGE_FILTER} \
             ORDER BY last_touched_at ASC"
        );
        sqlx::query_as::<_, JobApplication>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list active jobs", e)
            })
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> AppResult<Option<JobApplication>> {
        sqlx::query_as::<_, JobApplication>(
            "SELECT * FROM job_applications WHERE id = $1 AND user_id = $2",
        )
        .bind(job_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find job", e))
    }

    async fn count_for_user(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM job_applications WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count jobs", e))
    }

    async fn count_referencing_resume(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM job_applications WHERE user_id = $1 AND resume_version_id = $2",
        )
        .bind(user_id)
        .bind(resume_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count resume references", e)
        })
    }

    async fn insert(&self, job: &JobApplication) -> AppResult<JobApplication> {
        sqlx::query_as::<_, JobApplication>(
            "INSERT INTO job_applications \
             (id, user_id, company, role, location, url, stage, applied_date, salary, notes, \
              resume_version_id, last_touched_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) \
             RETURNING *",
        )
        .bind(job.id)
        .bind(job.user_id)
        .bind(&job.company)
        .bind(&job.role)
        .bind(&job.location)
        .bind(&job.url)
        .bind(job.stage)
        .bind(job.applied_date)
        .bind(&job.salary)
        .bind(&job.notes)
        .bind(job.resume_version_id)
        .bind(job.last_touched_at)
        .bind(job.created_at)
        .bind(job.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "create"))
    }

    async fn update(&self, job: &JobApplication) -> AppResult<Option<JobApplication>> {
        sqlx::query_as::<_, JobApplication>(
            "UPDATE job_applications SET \
             company = $3, role = $4, location = $5, url = $6, stage = $7, applied_date = $8, \
             salary = $9, notes = $10, resume_version_id = $11, \
             last_touched_at = GREATEST(last_touched_at, $12), updated_at = $13 \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(job.id)
        .bind(job.user_id)
        .bind(&job.company)
        .bind(&job.role)
        .bind(&job.location)
        .bind(&job.url)
        .bind(job.stage)
        .bind(job.applied_date)
        .bind(&job.salary)
        .bind(&job.notes)
        .bind(job.resume_version_id)
        .bind(job.last_touched_at)
        .bind(job.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update"))
    }

    async fn delete(&self, user_id: Uuid, job_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM job_applications WHERE id = $1 AND user_id = $2")
            .bind(job_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete job", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn touch(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<TouchOutcome>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let job = sqlx::query_as::<_, JobApplication>(
            "UPDATE job_applications \
             SET last_touched_at = GREATEST(last_touched_at, $3), updated_at = $3 \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(job_id)
        .bind(user_id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to touch job", e))?;

        let Some(job) = job else {
            return Ok(None);
        };

        let cancelled = sqlx::query(
            "UPDATE reminders SET cancelled_at = $3 \
             WHERE job_application_id = $1 AND user_id = $2 \
             AND sent_at IS NULL AND cancelled_at IS NULL",
        )
        .bind(job_id)
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to cancel reminders", e))?
        .rows_affected();

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(Some(TouchOutcome {
            job,
            cancelled_reminders: cancelled,
        }))
    }
}
