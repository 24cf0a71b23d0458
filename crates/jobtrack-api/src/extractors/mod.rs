//! Custom Axum extractors.

pub mod auth;
pub mod trigger;

pub use auth::AuthUser;
pub use trigger::CronTrigger;
