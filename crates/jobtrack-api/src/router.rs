//! Route definitions for the Jobtrack HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.body_limit_bytes;

    let api_routes = Router::new()
        .merge(health_routes())
        .merge(user_routes())
        .merge(job_routes())
        .merge(resume_routes())
        .merge(settings_routes())
        .merge(billing_routes())
        .merge(reminder_routes())
        .merge(cron_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

/// The caller's profile
fn user_routes() -> Router<AppState> {
    Router::new().route("/me", get(handlers::user::me))
}

/// Job CRUD, touch and the follow-up view
fn job_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/jobs",
            get(handlers::jobs::list_jobs).post(handlers::jobs::create_job),
        )
        .route("/jobs/followups", get(handlers::jobs::followups))
        .route(
            "/jobs/{id}",
            get(handlers::jobs::get_job)
                .put(handlers::jobs::update_job)
                .delete(handlers::jobs::delete_job),
        )
        .route("/jobs/{id}/touch", post(handlers::jobs::touch_job))
        .route("/jobs/{id}/reminders", get(handlers::jobs::job_reminders))
}

fn resume_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/resumes",
            get(handlers::resumes::list_resumes).post(handlers::resumes::create_resume),
        )
        .route(
            "/resumes/{id}",
            put(handlers::resumes::update_resume)
                .delete(handlers::resumes::delete_resume),
        )
}

fn settings_routes() -> Router<AppState> {
    Router::new().route(
        "/settings",
        get(handlers::settings::get_settings).put(handlers::settings::update_settings),
    )
}

/// Plan lookup, billing webhook and export
fn billing_routes() -> Router<AppState> {
    Router::new()
        .route("/billing/entitlement", get(handlers::billing::entitlement))
        .route("/billing/webhook", post(handlers::billing::webhook))
        .route("/export", get(handlers::export::export))
}

fn reminder_routes() -> Router<AppState> {
    Router::new().route("/reminders", get(handlers::reminders::list_reminders))
}

/// Scheduler triggers, reachable by GET and POST
fn cron_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/cron/generate-reminders",
            get(handlers::cron::generate_reminders).post(handlers::cron::generate_reminders),
        )
        .route(
            "/cron/send-reminders",
            get(handlers::cron::send_reminders).post(handlers::cron::send_reminders),
        )
}
