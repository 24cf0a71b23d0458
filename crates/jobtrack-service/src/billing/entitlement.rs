//! Entitlement resolution and plan changes.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use jobtrack_core::error::AppError;
use jobtrack_database::store::{EntitlementStore, Stores};
use jobtrack_entity::entitlement::{Plan, UserEntitlement};

/// Entitlement as seen by clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementView {
    /// Current plan.
    pub plan: Plan,
    /// Whether the plan unlocks paid capabilities.
    pub is_paid: bool,
}

impl From<Plan> for EntitlementView {
    fn from(plan: Plan) -> Self {
        Self {
            plan,
            is_paid: plan.is_paid(),
        }
    }
}

/// Resolves and changes user plans.
#[derive(Debug, Clone)]
pub struct EntitlementService {
    entitlements: Arc<dyn EntitlementStore>,
}

impl EntitlementService {
    /// Creates a new entitlement service.
    pub fn new(stores: &Stores) -> Self {
        Self {
            entitlements: stores.entitlements.clone(),
        }
    }

    /// Entitlement of `user_id`. A missing row means FREE.
    pub async fn get_entitlement(&self, user_id: Uuid) -> Result<EntitlementView, AppError> {
        let plan = self
            .entitlements
            .find(user_id)
            .await?
            .map(|e| e.plan)
            .unwrap_or_default();
        Ok(EntitlementView::from(plan))
    }

    /// Whether `user_id` holds a paid plan.
    pub async fn is_paid(&self, user_id: Uuid) -> Result<bool, AppError> {
        Ok(self.get_entitlement(user_id).await?.is_paid)
    }

    /// Fails with `Authorization` unless `user_id` holds a paid plan.
    pub async fn require_paid(&self, user_id: Uuid, feature: &str) -> Result<(), AppError> {
        if self.is_paid(user_id).await? {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "{feature} is only available for paid users. Upgrade to unlock it."
            )))
        }
    }

    /// Grant the lifetime plan. Idempotent.
    pub async fn upgrade_to_paid_lifetime(
        &self,
        user_id: Uuid,
    ) -> Result<UserEntitlement, AppError> {
        self.set_plan_at(user_id, Plan::PaidLifetime, Utc::now()).await
    }

    /// Set the plan of `user_id`.
    pub async fn set_plan(&self, user_id: Uuid, plan: Plan) -> Result<UserEntitlement, AppError> {
        self.set_plan_at(user_id, plan, Utc::now()).await
    }

    /// Set the plan of `user_id`, stamped at `now`.
    pub async fn set_plan_at(
        &self,
        user_id: Uuid,
        plan: Plan,
        now: DateTime<Utc>,
    ) -> Result<UserEntitlement, AppError> {
        let entitlement = self.entitlements.set_plan(user_id, plan, now).await?;
        info!(user_id = %user_id, plan = %entitlement.plan, "Plan updated");
        Ok(entitlement)
    }
}
