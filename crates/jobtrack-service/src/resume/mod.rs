//! Resume version management.

pub mod service;

pub use service::{ResumeInput, ResumeService};
