//! # jobtrack-core
//!
//! Core crate for Jobtrack. Contains configuration schemas, the unified
//! error system, and the outbound notification transport trait.
//!
//! This crate has **no** internal dependencies on other Jobtrack crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
