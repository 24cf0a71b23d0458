//! HTTP handlers, one module per resource.

pub mod billing;
pub mod cron;
pub mod export;
pub mod health;
pub mod jobs;
pub mod reminders;
pub mod resumes;
pub mod settings;
pub mod user;
