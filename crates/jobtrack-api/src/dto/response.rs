//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use jobtrack_entity::user::User;
use jobtrack_service::EntitlementView;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message text.
    pub message: String,
}

impl MessageResponse {
    /// Build from any string-like value.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Whether the process runs on the in-memory store.
    pub in_memory: bool,
}

/// The caller's identity and plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// User id.
    pub id: Uuid,
    /// Contact address.
    pub email: String,
    /// Member since.
    pub created_at: DateTime<Utc>,
    /// Current plan.
    pub entitlement: EntitlementView,
}

impl ProfileResponse {
    /// Combine a user row with its entitlement.
    pub fn new(user: User, entitlement: EntitlementView) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            entitlement,
        }
    }
}

/// Acknowledgement returned to the billing provider.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WebhookAck {
    /// Always `true`.
    pub received: bool,
}
