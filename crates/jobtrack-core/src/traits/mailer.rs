//! Notification transport trait for pluggable mail backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A fully rendered message ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    /// Recipient address.
    pub to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text alternative body.
    pub text: String,
}

/// Affirmative acceptance of a message by the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReceipt {
    /// Identifier assigned by the transport.
    pub message_id: String,
    /// Which transport accepted the message.
    pub provider: String,
}

/// Trait for outbound notification transports (Resend, SMTP, log).
///
/// Implementations return `Ok` only when the transport explicitly
/// confirmed acceptance. Anything else, including a response carrying
/// neither a success marker nor an error, must be an `Err`.
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug + 'static {
    /// Short transport name for logs.
    fn name(&self) -> &str;

    /// Deliver one message.
    async fn send(&self, email: &OutboundEmail) -> AppResult<DeliveryReceipt>;
}
