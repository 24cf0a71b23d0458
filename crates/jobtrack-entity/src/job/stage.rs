//! Pipeline stage enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a job application in the hiring funnel.
///
/// The set is ordered for display but transitions are not strictly linear:
/// any stage may move to any other.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "job_stage", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PipelineStage {
    /// Bookmarked, not yet applied.
    #[default]
    Saved,
    /// Application submitted.
    Applied,
    /// First recruiter conversation.
    RecruiterScreen,
    /// Technical interview round.
    Technical,
    /// Onsite / final round.
    Onsite,
    /// Offer received.
    Offer,
    /// Rejected by the employer.
    Rejected,
    /// Employer stopped responding.
    Ghosted,
}

impl PipelineStage {
    /// All stages in funnel order.
    pub const ALL: [PipelineStage; 8] = [
        Self::Saved,
        Self::Applied,
        Self::RecruiterScreen,
        Self::Technical,
        Self::Onsite,
        Self::Offer,
        Self::Rejected,
        Self::Ghosted,
    ];

    /// Stages that are in flight and therefore considered for follow-up.
    pub const ACTIVE: [PipelineStage; 4] = [
        Self::Applied,
        Self::RecruiterScreen,
        Self::Technical,
        Self::Onsite,
    ];

    /// Whether the stage ends the pipeline.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Offer | Self::Rejected | Self::Ghosted)
    }

    /// Whether the stage belongs to the interview group that shares a threshold.
    pub fn is_interview(&self) -> bool {
        matches!(self, Self::RecruiterScreen | Self::Technical | Self::Onsite)
    }

    /// Whether the stage is considered by the reminder engine.
    pub fn is_active(&self) -> bool {
        Self::ACTIVE.contains(self)
    }

    /// Return the stage as its stored string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Saved => "SAVED",
            Self::Applied => "APPLIED",
            Self::RecruiterScreen => "RECRUITER_SCREEN",
            Self::Technical => "TECHNICAL",
            Self::Onsite => "ONSITE",
            Self::Offer => "OFFER",
            Self::Rejected => "REJECTED",
            Self::Ghosted => "GHOSTED",
        }
    }

    /// Human-readable label, e.g. `"RECRUITER SCREEN"`.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PipelineStage {
    type Err = jobtrack_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| {
                jobtrack_core::AppError::validation(format!("Invalid pipeline stage: '{s}'"))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_and_active_are_disjoint() {
        for stage in PipelineStage::ALL {
            assert!(!(stage.is_terminal() && stage.is_active()), "{stage}");
        }
        assert!(!PipelineStage::Saved.is_active());
        assert!(!PipelineStage::Saved.is_terminal());
    }

    #[test]
    fn test_interview_group() {
        assert!(PipelineStage::RecruiterScreen.is_interview());
        assert!(PipelineStage::Technical.is_interview());
        assert!(PipelineStage::Onsite.is_interview());
        assert!(!PipelineStage::Applied.is_interview());
        assert!(!PipelineStage::Offer.is_interview());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "recruiter_screen".parse::<PipelineStage>().unwrap(),
            PipelineStage::RecruiterScreen
        );
        assert_eq!("GHOSTED".parse::<PipelineStage>().unwrap(), PipelineStage::Ghosted);
        assert!("interviewing".parse::<PipelineStage>().is_err());
    }

    #[test]
    fn test_serde_uses_screaming_case() {
        let json = serde_json::to_string(&PipelineStage::RecruiterScreen).unwrap();
        assert_eq!(json, "\"RECRUITER_SCREEN\"");
        assert_eq!(PipelineStage::Onsite.label(), "ONSITE");
        assert_eq!(PipelineStage::RecruiterScreen.label(), "RECRUITER SCREEN");
    }
}
