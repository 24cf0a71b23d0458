//! Job application domain entities.

pub mod model;
pub mod stage;

pub use model::{JobApplication, JobDraft, JobWithResume};
pub use stage::PipelineStage;
