//! Reminder domain entities.

pub mod kind;
pub mod model;

pub use kind::ReminderKind;
pub use model::{DueReminder, Reminder};
