//! Resend HTTP API transport.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use jobtrack_core::config::MailConfig;
use jobtrack_core::error::{AppError, ErrorKind};
use jobtrack_core::result::AppResult;
use jobtrack_core::traits::{DeliveryReceipt, Mailer, OutboundEmail};

const PROVIDER: &str = "resend";

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

/// Sends mail through the Resend `POST /emails` API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    from: String,
}

impl ResendMailer {
    /// Create a Resend transport from mail configuration.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        if config.resend_api_key.trim().is_empty() {
            return Err(AppError::configuration(
                "mail.resend_api_key is required for the resend provider",
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;
        Ok(Self {
            client,
            endpoint: config.resend_endpoint.clone(),
            api_key: config.resend_api_key.clone(),
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn send(&self, email: &OutboundEmail) -> AppResult<DeliveryReceipt> {
        let request = SendRequest {
            from: &self.from,
            to: [&email.to],
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::ExternalService, "Resend request failed", e)
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            AppError::with_source(ErrorKind::ExternalService, "Failed to read Resend response", e)
        })?;
        debug!(status, "Resend responded");

        interpret_response(status, &body)
    }
}

/// Decide whether a Resend response confirms acceptance.
///
/// Only a 2xx response carrying a non-empty `id` and no `error` counts as
/// delivered.
fn interpret_response(status: u16, body: &str) -> AppResult<DeliveryReceipt> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    let error_message = parsed.as_ref().and_then(|v| match v.get("error") {
        Some(Value::Null) | None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => Some(
            other
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        ),
    });

    if !(200..300).contains(&status) {
        let message = error_message
            .or_else(|| {
                parsed
                    .as_ref()
                    .and_then(|v| v.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("HTTP {status}"));
        return Err(AppError::external_service(format!(
            "Resend rejected message: {message}"
        )));
    }

    if let Some(message) = error_message {
        return Err(AppError::external_service(format!(
            "Resend reported an error: {message}"
        )));
    }

    match parsed
        .as_ref()
        .and_then(|v| v.get("id"))
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
    {
        Some(id) => Ok(DeliveryReceipt {
            message_id: id.to_string(),
            provider: PROVIDER.to_string(),
        }),
        None => Err(AppError::external_service(
            "Resend response carried neither a message id nor an error",
        )),
    }
}
