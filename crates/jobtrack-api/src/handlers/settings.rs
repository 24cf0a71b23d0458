//! Reminder settings handlers.

use axum::Json;
use axum::extract::State;

use jobtrack_entity::settings::UserSettings;
use jobtrack_service::SettingsInput;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/settings
pub async fn get_settings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserSettings>>, ApiError> {
    let settings = state.settings_service.get_settings(&auth).await?;
    Ok(Json(ApiResponse::ok(settings)))
}

/// PUT /api/settings
pub async fn update_settings(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<SettingsInput>,
) -> Result<Json<ApiResponse<UserSettings>>, ApiError> {
    let settings = state.settings_service.update_settings(&auth, req).await?;
    Ok(Json(ApiResponse::ok(settings)))
}
