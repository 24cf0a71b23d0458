//! Resume version handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use jobtrack_entity::resume::ResumeVersion;
use jobtrack_service::ResumeInput;

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/resumes
pub async fn list_resumes(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<ResumeVersion>>>, ApiError> {
    let resumes = state.resume_service.list_resumes(&auth).await?;
    Ok(Json(ApiResponse::ok(resumes)))
}

/// POST /api/resumes
pub async fn create_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ResumeInput>,
) -> Result<(StatusCode, Json<ApiResponse<ResumeVersion>>), ApiError> {
    let resume = state.resume_service.create_resume(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(resume))))
}

/// PUT /api/resumes/{id}
pub async fn update_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ResumeInput>,
) -> Result<Json<ApiResponse<ResumeVersion>>, ApiError> {
    let resume = state.resume_service.update_resume(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(resume)))
}

/// DELETE /api/resumes/{id}
pub async fn delete_resume(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.resume_service.delete_resume(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Resume version deleted"))))
}
