//! Follow-up reminder engine.
//!
//! - `policy` - pure staleness evaluation
//! - `generator` - creates reminders for stale jobs
//! - `dispatcher` - delivers due reminders
//! - `formatter` - renders reminder emails

pub mod dispatcher;
pub mod formatter;
pub mod generator;
pub mod policy;

pub use dispatcher::{DispatchOutcome, DispatchReport, DispatchStatus, ReminderDispatcher};
pub use formatter::ReminderFormatter;
pub use generator::{GenerationReport, ReminderGenerator};
pub use policy::{FollowupDecision, FollowupThresholds};
