//! # jobtrack-database
//!
//! Store contracts for every Jobtrack record, their PostgreSQL
//! implementations, and an in-memory implementation for tests and
//! local runs.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{
    EntitlementStore, JobStore, ReminderStore, ResumeStore, SettingsStore, Stores, TouchOutcome,
    UserStore,
};
