//! Plan enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability tier derived from billing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "plan", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    /// Limited job count, no export, no reminders.
    #[default]
    Free,
    /// One-time lifetime purchase.
    PaidLifetime,
}

impl Plan {
    /// Whether the plan unlocks paid capabilities.
    pub fn is_paid(&self) -> bool {
        matches!(self, Self::PaidLifetime)
    }

    /// Return the plan as its stored string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::PaidLifetime => "PAID_LIFETIME",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Plan {
    type Err = jobtrack_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "FREE" => Ok(Self::Free),
            "PAID" | "PAID_LIFETIME" => Ok(Self::PaidLifetime),
            _ => Err(jobtrack_core::AppError::validation(format!(
                "Invalid plan: '{s}'. Expected FREE or PAID_LIFETIME"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("free".parse::<Plan>().unwrap(), Plan::Free);
        assert_eq!("PAID_LIFETIME".parse::<Plan>().unwrap(), Plan::PaidLifetime);
        assert_eq!("paid".parse::<Plan>().unwrap(), Plan::PaidLifetime);
        assert!("gold".parse::<Plan>().is_err());
    }

    #[test]
    fn test_default_is_free() {
        assert_eq!(Plan::default(), Plan::Free);
        assert!(!Plan::Free.is_paid());
        assert!(Plan::PaidLifetime.is_paid());
    }
}
