//! User entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An account known to the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Identifier issued by the identity provider.
    pub id: Uuid,
    /// Contact address used for reminder delivery.
    pub email: String,
    /// When the user was first seen.
    pub created_at: DateTime<Utc>,
    /// When the user row was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user record stamped at `now`.
    pub fn new(id: Uuid, email: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
