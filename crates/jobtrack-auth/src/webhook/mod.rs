//! Billing provider webhook verification.

pub mod stripe;

pub use stripe::StripeSignatureVerifier;
