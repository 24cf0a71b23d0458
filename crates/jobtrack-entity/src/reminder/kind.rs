//! Reminder kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a reminder is about.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "reminder_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReminderKind {
    /// The job has gone stale and the user should reach out.
    #[default]
    FollowUp,
}

impl ReminderKind {
    /// Return the kind as its stored string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FollowUp => "FOLLOW_UP",
        }
    }
}

impl fmt::Display for ReminderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
