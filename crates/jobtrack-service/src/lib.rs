//! # jobtrack-service
//!
//! Business logic service layer for Jobtrack. Services orchestrate the
//! store contracts and the notification transport to implement
//! application-level use cases, the follow-up reminder engine first
//! among them.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod billing;
pub mod context;
pub mod export;
pub mod job;
pub mod reminder;
pub mod resume;
pub mod settings;
pub mod user;
mod validation;

pub use billing::{BillingService, EntitlementService, EntitlementView, WebhookOutcome};
pub use context::RequestContext;
pub use export::{ExportFormat, ExportService};
pub use job::{FollowupItem, JobInput, JobService};
pub use reminder::{
    DispatchReport, GenerationReport, ReminderDispatcher, ReminderFormatter, ReminderGenerator,
};
pub use resume::{ResumeInput, ResumeService};
pub use settings::{SettingsInput, SettingsService};
pub use user::UserService;
