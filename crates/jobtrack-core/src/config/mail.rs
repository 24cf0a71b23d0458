//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

/// Which notification transport to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MailProvider {
    /// Resend HTTP API.
    Resend,
    /// SMTP relay.
    Smtp,
    /// Write messages to the log and report success (development only).
    #[default]
    Log,
}

/// Outbound mail configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Selected transport.
    #[serde(default)]
    pub provider: MailProvider,
    /// Sender address, e.g. `"Jobtrack <reminders@example.com>"`.
    #[serde(default = "default_from")]
    pub from: String,
    /// Public base URL of the web app, linked from reminder emails.
    #[serde(default = "default_app_url")]
    pub app_base_url: String,
    /// Resend API key.
    #[serde(default)]
    pub resend_api_key: String,
    /// Resend API endpoint.
    #[serde(default = "default_resend_endpoint")]
    pub resend_endpoint: String,
    /// Request timeout for HTTP transports, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// SMTP relay settings.
    #[serde(default)]
    pub smtp: SmtpConfig,
}

/// SMTP relay settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SmtpConfig {
    /// Relay host name.
    #[serde(default)]
    pub host: String,
    /// Relay port (0 uses the transport default).
    #[serde(default)]
    pub port: u16,
    /// Relay username.
    #[serde(default)]
    pub username: String,
    /// Relay password.
    #[serde(default)]
    pub password: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            provider: MailProvider::default(),
            from: default_from(),
            app_base_url: default_app_url(),
            resend_api_key: String::new(),
            resend_endpoint: default_resend_endpoint(),
            timeout_seconds: default_timeout(),
            smtp: SmtpConfig::default(),
        }
    }
}

fn default_from() -> String {
    "Jobtrack <reminders@localhost>".to_string()
}

fn default_app_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_resend_endpoint() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_timeout() -> u64 {
    15
}
