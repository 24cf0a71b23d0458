//! Resume version entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A named resume revision that job applications can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ResumeVersion {
    /// Unique resume identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Display name, e.g. "Backend v3".
    pub name: String,
    /// Where the document lives.
    pub url: String,
    /// When the resume was created.
    pub created_at: DateTime<Utc>,
    /// When the resume was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ResumeVersion {
    /// Build a new resume version owned by `user_id`.
    pub fn create(
        user_id: Uuid,
        name: impl Into<String>,
        url: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name: name.into(),
            url: url.into(),
            created_at: now,
            updated_at: now,
        }
    }
}
