//! Per-user settings entities.

pub mod model;

pub use model::UserSettings;
