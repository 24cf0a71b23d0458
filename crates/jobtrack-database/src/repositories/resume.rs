//! Resume version repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use jobtrack_core::error::{AppError, ErrorKind};
use jobtrack_core::result::AppResult;
use jobtrack_entity::resume::ResumeVersion;

use crate::store::ResumeStore;

/// Repository for resume version rows.
#[derive(Debug, Clone)]
pub struct ResumeRepository {
    pool: PgPool,
}

impl ResumeRepository {
    /// Create a new resume repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ResumeStore for ResumeRepository {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<ResumeVersion>> {
        sqlx::query_as::<_, ResumeVersion>(
            "SELECT * FROM resume_versions WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list resumes", e))
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        resume_id: Uuid,
    ) -> AppResult<Option<ResumeVersion>> {
        sqlx::query_as::<_, ResumeVersion>(
            "SELECT * FROM resume_versions WHERE id = $1 AND user_id = $2",
        )
        .bind(resume_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find resume", e))
    }

    async fn insert(&self, resume: &ResumeVersion) -> AppResult<ResumeVersion> {
        sqlx::query_as::<_, ResumeVersion>(
            "INSERT INTO resume_versions (id, user_id, name, url, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(resume.id)
        .bind(resume.user_id)
        .bind(&resume.name)
        .bind(&resume.url)
        .bind(resume.created_at)
        .bind(resume.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create resume", e))
    }

    async fn update(&self, resume: &ResumeVersion) -> AppResult<Option<ResumeVersion>> {
        sqlx::query_as::<_, ResumeVersion>(
            "UPDATE resume_versions SET name = $3, url = $4, updated_at = $5 \
             WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(resume.id)
        .bind(resume.user_id)
        .bind(&resume.name)
        .bind(&resume.url)
        .bind(resume.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update resume", e))
    }

    async fn delete(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM resume_versions WHERE id = $1 AND user_id = $2")
            .bind(resume_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                    AppError::conflict("Resume version is still referenced by job applications")
                }
                other => {
                    AppError::with_source(ErrorKind::Database, "Failed to delete resume", other)
                }
            })?;
        Ok(result.rows_affected() > 0)
    }
}
