//! Job Lifecycle Manager: job CRUD, touch, and the follow-up view.

pub mod service;

pub use service::{FollowupItem, JobInput, JobService};
