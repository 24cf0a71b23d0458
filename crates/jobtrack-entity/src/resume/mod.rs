//! Resume version domain entities.

pub mod model;

pub use model::ResumeVersion;
