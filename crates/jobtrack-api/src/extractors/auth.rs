//! `AuthUser` extractor: resolves the bearer token into a request context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use jobtrack_core::error::AppError;
use jobtrack_service::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated user context available in handlers.
///
/// Resolving the identity also provisions the user on first sight, so
/// every handler can rely on the user row, settings and entitlement
/// existing.
#[derive(Debug, Clone)]
pub struct AuthUser(pub RequestContext);

impl AuthUser {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthUser {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let claims = state.jwt_decoder.decode_bearer(header)?;
        let user = state
            .user_service
            .ensure_provisioned(claims.sub, &claims.email)
            .await?;

        Ok(AuthUser(RequestContext::new(user.id, user.email)))
    }
}
