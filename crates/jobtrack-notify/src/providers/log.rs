//! Development transport that only writes to the log.

use async_trait::async_trait;
use tracing::info;
use uuid::Uuid;

use jobtrack_core::result::AppResult;
use jobtrack_core::traits::{DeliveryReceipt, Mailer, OutboundEmail};

/// Accepts every message and logs it instead of delivering it.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl LogMailer {
    /// Create a new log transport.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Mailer for LogMailer {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, email: &OutboundEmail) -> AppResult<DeliveryReceipt> {
        let message_id = format!("log-{}", Uuid::new_v4());
        info!(
            to = %email.to,
            subject = %email.subject,
            message_id = %message_id,
            "Email accepted by log transport"
        );
        Ok(DeliveryReceipt {
            message_id,
            provider: self.name().to_string(),
        })
    }
}
