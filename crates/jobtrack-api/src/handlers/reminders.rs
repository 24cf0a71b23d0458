//! Reminder listing handler.

use axum::Json;
use axum::extract::State;

use jobtrack_entity::reminder::Reminder;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/reminders
pub async fn list_reminders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Reminder>>>, ApiError> {
    let reminders = state.job_service.list_reminders(&auth).await?;
    Ok(Json(ApiResponse::ok(reminders)))
}
