//! Per-user reminder settings.

pub mod service;

pub use service::{SettingsInput, SettingsService};
