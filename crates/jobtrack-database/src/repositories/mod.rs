//! PostgreSQL implementations of the store contracts.

pub mod entitlement;
pub mod job;
pub mod reminder;
pub mod resume;
pub mod settings;
pub mod user;

pub use entitlement::EntitlementRepository;
pub use job::JobRepository;
pub use reminder::ReminderRepository;
pub use resume::ResumeRepository;
pub use settings::SettingsRepository;
pub use user::UserRepository;
