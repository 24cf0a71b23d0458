//! Billing configuration.

use serde::{Deserialize, Serialize};

/// Billing provider webhook and plan limit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingConfig {
    /// Webhook signing secret. Empty accepts unsigned payloads (development only).
    #[serde(default)]
    pub webhook_secret: String,
    /// Maximum age of a signed webhook timestamp, in seconds.
    #[serde(default = "default_tolerance")]
    pub webhook_tolerance_seconds: i64,
    /// Maximum number of job applications on the FREE plan.
    #[serde(default = "default_free_job_limit")]
    pub free_job_limit: i64,
}

impl BillingConfig {
    /// Whether webhook payloads must carry a valid signature.
    pub fn verifies_signatures(&self) -> bool {
        !self.webhook_secret.is_empty()
    }
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            webhook_secret: String::new(),
            webhook_tolerance_seconds: default_tolerance(),
            free_job_limit: default_free_job_limit(),
        }
    }
}

fn default_tolerance() -> i64 {
    300
}

fn default_free_job_limit() -> i64 {
    10
}
