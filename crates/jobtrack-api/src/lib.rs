//! # jobtrack-api
//!
//! HTTP API layer for Jobtrack built on Axum.
//!
//! Provides the user-facing REST endpoints, the scheduler trigger and
//! billing webhook endpoints, the bearer identity extractor, DTOs and
//! error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
