//! Core traits defined in `jobtrack-core` and implemented by other crates.

pub mod mailer;

pub use mailer::{DeliveryReceipt, Mailer, OutboundEmail};
