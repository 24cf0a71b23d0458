//! Job application handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use jobtrack_entity::job::{JobApplication, JobWithResume};
use jobtrack_entity::reminder::Reminder;
use jobtrack_service::{FollowupItem, JobInput};

use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<JobWithResume>>>, ApiError> {
    let jobs = state.job_service.list_jobs(&auth).await?;
    Ok(Json(ApiResponse::ok(jobs)))
}

/// POST /api/jobs
pub async fn create_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<JobInput>,
) -> Result<(StatusCode, Json<ApiResponse<JobApplication>>), ApiError> {
    let job = state.job_service.create_job(&auth, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(job))))
}

/// GET /api/jobs/{id}
pub async fn get_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobApplication>>, ApiError> {
    let job = state.job_service.get_job(&auth, id).await?;
    Ok(Json(ApiResponse::ok(job)))
}

/// PUT /api/jobs/{id}
pub async fn update_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<JobInput>,
) -> Result<Json<ApiResponse<JobApplication>>, ApiError> {
    let job = state.job_service.update_job(&auth, id, req).await?;
    Ok(Json(ApiResponse::ok(job)))
}

/// DELETE /api/jobs/{id}
pub async fn delete_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.job_service.delete_job(&auth, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Job deleted"))))
}

/// POST /api/jobs/{id}/touch
pub async fn touch_job(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<JobApplication>>, ApiError> {
    let job = state.job_service.touch(&auth, id).await?;
    Ok(Json(ApiResponse::ok(job)))
}

/// GET /api/jobs/{id}/reminders
pub async fn job_reminders(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Reminder>>>, ApiError> {
    let reminders = state.job_service.list_job_reminders(&auth, id).await?;
    Ok(Json(ApiResponse::ok(reminders)))
}

/// GET /api/jobs/followups
pub async fn followups(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<FollowupItem>>>, ApiError> {
    let items = state.job_service.jobs_needing_followup(&auth).await?;
    Ok(Json(ApiResponse::ok(items)))
}
