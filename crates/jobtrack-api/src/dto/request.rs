//! Request DTOs.

use serde::{Deserialize, Serialize};

/// Query string of `GET /api/export`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportQuery {
    /// `csv` (default) or `json`.
    #[serde(default)]
    pub format: Option<String>,
}
