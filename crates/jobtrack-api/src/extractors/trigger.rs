//! `CronTrigger` extractor: guards the scheduler trigger endpoints.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::state::AppState;

/// Proof that the caller presented the configured scheduler secret.
#[derive(Debug, Clone, Copy)]
pub struct CronTrigger;

impl FromRequestParts<AppState> for CronTrigger {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        state.trigger_guard.verify(header)?;
        Ok(CronTrigger)
    }
}
