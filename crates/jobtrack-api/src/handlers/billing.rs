//! Entitlement and billing webhook handlers.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use chrono::Utc;
use tracing::info;

use jobtrack_service::{EntitlementView, WebhookOutcome};

use crate::dto::response::{ApiResponse, WebhookAck};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

const SIGNATURE_HEADER: &str = "stripe-signature";

/// GET /api/billing/entitlement
pub async fn entitlement(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<EntitlementView>>, ApiError> {
    let view = state
        .entitlement_service
        .get_entitlement(auth.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// POST /api/billing/webhook
///
/// Reads the raw body so the signature is checked over the exact bytes
/// the provider signed.
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let outcome = state
        .billing_service
        .handle_webhook(&body, signature, Utc::now())
        .await?;
    if let WebhookOutcome::Ignored { reason } = &outcome {
        info!(reason = %reason, "Billing webhook ignored");
    }

    Ok(Json(WebhookAck { received: true }))
}
