//! Billing entitlement entities.

pub mod model;
pub mod plan;

pub use model::UserEntitlement;
pub use plan::Plan;
