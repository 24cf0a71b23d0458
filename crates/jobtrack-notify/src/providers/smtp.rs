//! SMTP relay transport.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use jobtrack_core::config::MailConfig;
use jobtrack_core::error::{AppError, ErrorKind};
use jobtrack_core::result::AppResult;
use jobtrack_core::traits::{DeliveryReceipt, Mailer, OutboundEmail};

const PROVIDER: &str = "smtp";

/// Sends mail through an authenticated SMTP relay.
#[derive(Clone)]
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    host: String,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("host", &self.host)
            .field("from", &self.from.to_string())
            .finish()
    }
}

impl SmtpMailer {
    /// Create an SMTP transport from mail configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let smtp = &config.smtp;
        if smtp.host.trim().is_empty() {
            return Err(AppError::configuration(
                "mail.smtp.host is required for the smtp provider",
            ));
        }

        let from: Mailbox = config.from.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid sender address '{}'", config.from),
                e,
            )
        })?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host).map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Invalid SMTP relay", e)
        })?;
        if smtp.port != 0 {
            builder = builder.port(smtp.port);
        }
        if !smtp.username.is_empty() {
            builder = builder.credentials(Credentials::new(
                smtp.username.clone(),
                smtp.password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from,
            host: smtp.host.clone(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn send(&self, email: &OutboundEmail) -> AppResult<DeliveryReceipt> {
        let to: Mailbox = email.to.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Validation,
                format!("Invalid recipient address '{}'", email.to),
                e,
            )
        })?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|e| {
                AppError::with_source(ErrorKind::Internal, "Failed to build email message", e)
            })?;

        let response = self.transport.send(message).await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "SMTP delivery failed", e)
        })?;

        if !response.is_positive() {
            return Err(AppError::external_service(format!(
                "SMTP relay did not accept message (code {})",
                response.code()
            )));
        }

        let message_id = response.message().collect::<Vec<_>>().join(" ");
        debug!(code = %response.code(), "SMTP relay accepted message");

        Ok(DeliveryReceipt {
            message_id,
            provider: PROVIDER.to_string(),
        })
    }
}
