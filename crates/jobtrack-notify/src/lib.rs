//! # jobtrack-notify
//!
//! Notification transports implementing [`jobtrack_core::traits::Mailer`].
//! The transport is picked from configuration at startup.

pub mod factory;
pub mod providers;

pub use factory::build_mailer;
pub use providers::{LogMailer, ResendMailer, SmtpMailer};
