//! # jobtrack-auth
//!
//! Verification of everything that calls into Jobtrack from outside:
//!
//! - `jwt` - bearer tokens issued by the identity provider
//! - `trigger` - the shared secret presented by the external scheduler
//! - `webhook` - billing provider webhook signatures

pub mod jwt;
pub mod trigger;
pub mod webhook;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use trigger::TriggerGuard;
pub use webhook::StripeSignatureVerifier;

/// Compare two byte strings without short-circuiting on the first mismatch.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
