//! Stripe `Stripe-Signature` header verification.
//!
//! The header looks like `t=1492774577,v1=5257a8...,v1=...`. A payload is
//! authentic when any `v1` equals hex(HMAC-SHA256(secret, "{t}.{body}"))
//! and `t` is within the configured tolerance of the current time.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use jobtrack_core::config::BillingConfig;
use jobtrack_core::error::AppError;

use crate::constant_time_eq;

type HmacSha256 = Hmac<Sha256>;

/// Verifies webhook payloads against the shared signing secret.
#[derive(Clone)]
pub struct StripeSignatureVerifier {
    secret: String,
    tolerance_seconds: i64,
}

impl std::fmt::Debug for StripeSignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeSignatureVerifier")
            .field("tolerance_seconds", &self.tolerance_seconds)
            .finish()
    }
}

impl StripeSignatureVerifier {
    /// Build a verifier from billing configuration. Returns `None` when no
    /// secret is configured.
    pub fn from_config(config: &BillingConfig) -> Option<Self> {
        if !config.verifies_signatures() {
            return None;
        }
        Some(Self {
            secret: config.webhook_secret.clone(),
            tolerance_seconds: config.webhook_tolerance_seconds,
        })
    }

    /// Verify `payload` against the signature header at unix time `now`.
    pub fn verify(&self, payload: &[u8], header: &str, now: i64) -> Result<(), AppError> {
        let mut timestamp: Option<i64> = None;
        let mut signatures: Vec<&str> = Vec::new();
        for part in header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp = value.parse().ok(),
                Some(("v1", value)) => signatures.push(value),
                _ => {}
            }
        }

        let timestamp = timestamp
            .ok_or_else(|| AppError::authorization("Webhook signature has no timestamp"))?;
        if signatures.is_empty() {
            return Err(AppError::authorization("Webhook signature has no v1 entry"));
        }
        let within_tolerance = now
            .checked_sub(timestamp)
            .map(i64::unsigned_abs)
            .is_some_and(|skew| skew <= self.tolerance_seconds.unsigned_abs());
        if !within_tolerance {
            return Err(AppError::authorization("Webhook timestamp outside tolerance"));
        }

        let expected = self.compute(timestamp, payload)?;
        if signatures
            .iter()
            .any(|candidate| constant_time_eq(candidate.as_bytes(), expected.as_bytes()))
        {
            Ok(())
        } else {
            Err(AppError::authorization("Webhook signature mismatch"))
        }
    }

    /// Produce a `Stripe-Signature` header value for `payload` at `timestamp`.
    pub fn sign(&self, payload: &[u8], timestamp: i64) -> Result<String, AppError> {
        Ok(format!("t={timestamp},v1={}", self.compute(timestamp, payload)?))
    }

    fn compute(&self, timestamp: i64, payload: &[u8]) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|_| AppError::configuration("Invalid webhook secret"))?;
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(payload);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}
