//! Convenience result type alias for Jobtrack.

use crate::error::AppError;

/// A specialized `Result` type for Jobtrack operations.
pub type AppResult<T> = Result<T, AppError>;
