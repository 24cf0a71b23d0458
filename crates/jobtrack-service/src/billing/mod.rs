//! Entitlements and the billing webhook.

pub mod entitlement;
pub mod webhook;

pub use entitlement::{EntitlementService, EntitlementView};
pub use webhook::{BillingService, WebhookOutcome};
