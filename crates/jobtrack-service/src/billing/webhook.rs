//! Billing provider webhook handling.
//!
//! Only `checkout.session.completed` events with a paid status change
//! state; everything else is acknowledged and ignored so the provider does
//! not retry it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use jobtrack_auth::StripeSignatureVerifier;
use jobtrack_core::config::BillingConfig;
use jobtrack_core::error::AppError;
use jobtrack_entity::entitlement::Plan;

use super::entitlement::EntitlementService;

const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    event_type: String,
    data: EventData,
}

#[derive(Debug, Deserialize)]
struct EventData {
    object: CheckoutSession,
}

#[derive(Debug, Default, Deserialize)]
struct CheckoutSession {
    #[serde(default)]
    payment_status: Option<String>,
    #[serde(default)]
    metadata: Option<SessionMetadata>,
}

#[derive(Debug, Default, Deserialize)]
struct SessionMetadata {
    #[serde(rename = "userId", default)]
    user_id: Option<String>,
}

/// Result of handling one webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WebhookOutcome {
    /// The user was granted the lifetime plan.
    Upgraded {
        /// Upgraded user.
        user_id: Uuid,
    },
    /// The event was acknowledged without changes.
    Ignored {
        /// Why nothing happened.
        reason: String,
    },
}

/// Verifies and applies billing webhook events.
#[derive(Debug, Clone)]
pub struct BillingService {
    entitlements: EntitlementService,
    verifier: Option<StripeSignatureVerifier>,
}

impl BillingService {
    /// Creates a billing service. Signature checks are skipped when no
    /// webhook secret is configured.
    pub fn new(entitlements: EntitlementService, config: &BillingConfig) -> Self {
        let verifier = StripeSignatureVerifier::from_config(config);
        if verifier.is_none() {
            warn!("Billing webhook secret not configured; signatures will not be verified");
        }
        Self {
            entitlements,
            verifier,
        }
    }

    /// Handle a raw webhook body and its `Stripe-Signature` header.
    pub async fn handle_webhook(
        &self,
        payload: &[u8],
        signature: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<WebhookOutcome, AppError> {
        let signature =
            signature.ok_or_else(|| AppError::validation("Missing Stripe-Signature header"))?;
        if let Some(verifier) = &self.verifier {
            verifier.verify(payload, signature, now.timestamp())?;
        }

        let event: WebhookEvent = serde_json::from_slice(payload)
            .map_err(|e| AppError::validation(format!("Malformed webhook payload: {e}")))?;

        if event.event_type != CHECKOUT_COMPLETED {
            return Ok(WebhookOutcome::Ignored {
                reason: format!("unhandled event type {}", event.event_type),
            });
        }

        let session = event.data.object;
        let user_id = session
            .metadata
            .and_then(|m| m.user_id)
            .ok_or_else(|| AppError::validation("Checkout session has no userId metadata"))?;
        let user_id = Uuid::parse_str(&user_id)
            .map_err(|_| AppError::validation(format!("Invalid userId '{user_id}'")))?;

        if session.payment_status.as_deref() != Some("paid") {
            return Ok(WebhookOutcome::Ignored {
                reason: format!(
                    "payment status {}",
                    session.payment_status.as_deref().unwrap_or("missing")
                ),
            });
        }

        self.entitlements
            .set_plan_at(user_id, Plan::PaidLifetime, now)
            .await?;
        info!(user_id = %user_id, "Lifetime plan purchased");
        Ok(WebhookOutcome::Upgraded { user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_parsing_tolerates_missing_fields() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"type":"checkout.session.completed","data":{"object":{}}}"#,
        )
        .unwrap();
        assert_eq!(event.event_type, CHECKOUT_COMPLETED);
        assert!(event.data.object.metadata.is_none());
        assert!(event.data.object.payment_status.is_none());
    }
}
