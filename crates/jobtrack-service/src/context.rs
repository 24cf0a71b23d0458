//! Request context carrying the resolved caller identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for the current authenticated request.
///
/// Built by the API layer once the bearer token is verified and passed
/// into every user-scoped service method, so each operation filters by
/// the caller's identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The user's contact address.
    pub email: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context stamped with the current time.
    pub fn new(user_id: Uuid, email: impl Into<String>) -> Self {
        Self::at(user_id, email, Utc::now())
    }

    /// Creates a request context with an explicit request time.
    pub fn at(user_id: Uuid, email: impl Into<String>, request_time: DateTime<Utc>) -> Self {
        Self {
            user_id,
            email: email.into(),
            request_time,
        }
    }
}
