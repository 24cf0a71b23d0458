//! User entitlement entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::plan::Plan;

/// Billing-derived plan, one row per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserEntitlement {
    /// Owning user.
    pub user_id: Uuid,
    /// Current plan.
    pub plan: Plan,
    /// When the row was created.
    pub created_at: DateTime<Utc>,
    /// When the plan last changed.
    pub updated_at: DateTime<Utc>,
}

impl UserEntitlement {
    /// A FREE entitlement for a new user.
    pub fn free(user_id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            plan: Plan::Free,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the user holds a paid plan.
    pub fn is_paid(&self) -> bool {
        self.plan.is_paid()
    }
}
