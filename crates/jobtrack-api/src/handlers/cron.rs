//! Scheduler trigger handlers.
//!
//! Registered for both GET and POST so any external scheduler can call
//! them.

use axum::Json;
use axum::extract::State;

use jobtrack_service::{DispatchReport, GenerationReport};

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::CronTrigger;
use crate::state::AppState;

/// GET|POST /api/cron/generate-reminders
pub async fn generate_reminders(
    State(state): State<AppState>,
    _trigger: CronTrigger,
) -> Result<Json<ApiResponse<GenerationReport>>, ApiError> {
    let report = state.generator.generate().await?;
    Ok(Json(ApiResponse::ok(report)))
}

/// GET|POST /api/cron/send-reminders
pub async fn send_reminders(
    State(state): State<AppState>,
    _trigger: CronTrigger,
) -> Result<Json<ApiResponse<DispatchReport>>, ApiError> {
    let report = state.dispatcher.send().await?;
    Ok(Json(ApiResponse::ok(report)))
}
