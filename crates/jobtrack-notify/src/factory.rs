//! Selects the configured notification transport.

use std::sync::Arc;

use tracing::info;

use jobtrack_core::config::{MailConfig, MailProvider};
use jobtrack_core::result::AppResult;
use jobtrack_core::traits::Mailer;

use crate::providers::{LogMailer, ResendMailer, SmtpMailer};

/// Build the mailer named by `config.provider`.
pub fn build_mailer(config: &MailConfig) -> AppResult<Arc<dyn Mailer>> {
    let mailer: Arc<dyn Mailer> = match config.provider {
        MailProvider::Resend => {
            info!(endpoint = %config.resend_endpoint, "Initializing Resend mail transport");
            Arc::new(ResendMailer::new(config)?)
        }
        MailProvider::Smtp => {
            info!(
                host = %config.smtp.host,
                port = config.smtp.port,
                "Initializing SMTP mail transport"
            );
            Arc::new(SmtpMailer::new(config)?)
        }
        MailProvider::Log => {
            info!("Initializing log-only mail transport");
            Arc::new(LogMailer::new())
        }
    };
    Ok(mailer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_log_transport() {
        let mailer = build_mailer(&MailConfig::default()).unwrap();
        assert_eq!(mailer.name(), "log");
    }

    #[test]
    fn test_resend_requires_api_key() {
        let config = MailConfig {
            provider: MailProvider::Resend,
            ..MailConfig::default()
        };
        assert!(build_mailer(&config).is_err());
    }

    #[test]
    fn test_smtp_requires_host() {
        let config = MailConfig {
            provider: MailProvider::Smtp,
            ..MailConfig::default()
        };
        assert!(build_mailer(&config).is_err());
    }
}
