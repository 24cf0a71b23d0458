//! Scheduler trigger authentication.

use tracing::warn;

use jobtrack_core::config::AuthConfig;
use jobtrack_core::error::AppError;

use crate::constant_time_eq;

/// Checks the `Authorization: Bearer <secret>` header on scheduler calls.
#[derive(Clone)]
pub struct TriggerGuard {
    secret: Option<String>,
}

impl std::fmt::Debug for TriggerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TriggerGuard")
            .field("enabled", &self.secret.is_some())
            .finish()
    }
}

impl TriggerGuard {
    /// Build a guard from auth configuration. An empty secret disables it.
    pub fn new(config: &AuthConfig) -> Self {
        let secret = Some(config.cron_secret.clone()).filter(|s| !s.is_empty());
        if secret.is_none() {
            warn!("auth.cron_secret is empty; scheduler trigger endpoints are unauthenticated");
        }
        Self { secret }
    }

    /// Whether a secret is configured.
    pub fn is_enabled(&self) -> bool {
        self.secret.is_some()
    }

    /// Accept the call or fail with an authorization error.
    pub fn verify(&self, authorization: Option<&str>) -> Result<(), AppError> {
        let Some(secret) = &self.secret else {
            return Ok(());
        };
        let presented = authorization
            .and_then(|h| h.strip_prefix("Bearer "))
            .unwrap_or_default();
        if constant_time_eq(presented.as_bytes(), secret.as_bytes()) {
            Ok(())
        } else {
            Err(AppError::authorization("Invalid scheduler trigger secret"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard(secret: &str) -> TriggerGuard {
        TriggerGuard::new(&AuthConfig {
            cron_secret: secret.into(),
            ..AuthConfig::default()
        })
    }

    #[test]
    fn test_matching_secret() {
        assert!(guard("s3cret").verify(Some("Bearer s3cret")).is_ok());
    }

    #[test]
    fn test_wrong_or_missing_secret() {
        let g = guard("s3cret");
        assert!(g.verify(Some("Bearer nope")).is_err());
        assert!(g.verify(Some("s3cret")).is_err());
        assert!(g.verify(None).is_err());
    }

    #[test]
    fn test_disabled_when_empty() {
        let g = guard("");
        assert!(!g.is_enabled());
        assert!(g.verify(None).is_ok());
    }
}
