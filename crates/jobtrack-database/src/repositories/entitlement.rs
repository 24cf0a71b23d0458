//! User entitlement repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use jobtrack_core::error::{AppError, ErrorKind};
use jobtrack_core::result::AppResult;
use jobtrack_entity::entitlement::{Plan, UserEntitlement};

use crate::store::EntitlementStore;

/// Repository for billing entitlement rows.
#[derive(Debug, Clone)]
pub struct EntitlementRepository {
    pool: PgPool,
}

impl EntitlementRepository {
    /// Create a new entitlement repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntitlementStore for EntitlementRepository {
    async fn find(&self, user_id: Uuid) -> AppResult<Option<UserEntitlement>> {
        sqlx::query_as::<_, UserEntitlement>("SELECT * FROM user_entitlements WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find entitlement", e)
            })
    }

    async fn set_plan(
        &self,
        user_id: Uuid,
        plan: Plan,
        now: DateTime<Utc>,
    ) -> AppResult<UserEntitlement> {
        sqlx::query_as::<_, UserEntitlement>(
            "INSERT INTO user_entitlements (user_id, plan, created_at, updated_at) \
             VALUES ($1, $2, $3, $3) \
             ON CONFLICT (user_id) DO UPDATE SET \
             plan = EXCLUDED.plan, updated_at = EXCLUDED.updated_at \
             RETURNING *",
        )
        .bind(user_id)
        .bind(plan)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::not_found(format!("User {user_id} not found"))
            }
            other => AppError::with_source(ErrorKind::Database, "Failed to set plan", other),
        })
    }
}
