//! Caller profile handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, ProfileResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let user = state.user_service.get(auth.user_id).await?;
    let entitlement = state
        .entitlement_service
        .get_entitlement(auth.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(ProfileResponse::new(user, entitlement))))
}
