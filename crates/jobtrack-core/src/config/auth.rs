//! Identity and trigger authentication configuration.

use serde::{Deserialize, Serialize};

/// Settings for resolving caller identity and authenticating scheduler triggers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared HMAC secret used by the identity provider to sign bearer tokens.
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Expected `iss` claim. Empty disables the issuer check.
    #[serde(default)]
    pub jwt_issuer: String,
    /// Clock skew tolerance in seconds.
    #[serde(default = "default_leeway")]
    pub jwt_leeway_seconds: u64,
    /// Bearer secret expected on scheduler trigger calls. Empty disables the check.
    #[serde(default)]
    pub cron_secret: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_issuer: String::new(),
            jwt_leeway_seconds: default_leeway(),
            cron_secret: String::new(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_leeway() -> u64 {
    5
}
