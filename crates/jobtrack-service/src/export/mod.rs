//! Data export for paid users.

pub mod csv;
pub mod service;

pub use service::{ExportFormat, ExportService};
