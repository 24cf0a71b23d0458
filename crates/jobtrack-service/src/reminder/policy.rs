//! Follow-up policy: decides whether a job has gone stale.
//!
//! Pure functions only. The generator and the "needs follow-up" view both
//! go through [`evaluate`] so they can never disagree.

use chrono::{DateTime, Days, Utc};
use serde::{Deserialize, Serialize};

use jobtrack_entity::job::PipelineStage;
use jobtrack_entity::settings::UserSettings;

const SECONDS_PER_DAY: i64 = 86_400;

/// Per-user staleness thresholds, in whole days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupThresholds {
    /// Threshold for APPLIED.
    pub applied_days: i32,
    /// Threshold for RECRUITER_SCREEN, TECHNICAL and ONSITE.
    pub interview_days: i32,
}

impl From<&UserSettings> for FollowupThresholds {
    fn from(settings: &UserSettings) -> Self {
        Self {
            applied_days: settings.applied_followup_days,
            interview_days: settings.interview_followup_days,
        }
    }
}

impl FollowupThresholds {
    /// Threshold that applies to `stage`, or `None` if the stage is never
    /// followed up.
    pub fn for_stage(&self, stage: PipelineStage) -> Option<i32> {
        match stage {
            PipelineStage::Applied => Some(self.applied_days),
            s if s.is_interview() => Some(self.interview_days),
            _ => None,
        }
    }
}

/// Outcome of evaluating one job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowupDecision {
    /// Whether the job is due for follow-up.
    pub due: bool,
    /// Threshold that was applied; 0 for stages that are never due.
    pub threshold_days_used: i32,
    /// Whole days elapsed since the last touch (floored).
    pub elapsed_days: i64,
    /// When the job became stale: `last_touched_at + threshold` calendar
    /// days. Set only when `due`.
    pub trigger_at: Option<DateTime<Utc>>,
}

/// Whole days between `from` and `to`, truncated toward negative infinity.
pub fn elapsed_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// `last_touched_at` plus `days` calendar days.
pub fn trigger_instant(last_touched_at: DateTime<Utc>, days: i32) -> Option<DateTime<Utc>> {
    let days = u64::try_from(days).ok()?;
    last_touched_at.checked_add_days(Days::new(days))
}

/// Decide whether a job in `stage`, last touched at `last_touched_at`, is
/// due for follow-up at `now`.
pub fn evaluate(
    stage: PipelineStage,
    last_touched_at: DateTime<Utc>,
    now: DateTime<Utc>,
    thresholds: FollowupThresholds,
) -> FollowupDecision {
    let elapsed = elapsed_days(last_touched_at, now);
    let Some(threshold) = thresholds.for_stage(stage) else {
        return FollowupDecision {
            due: false,
            threshold_days_used: 0,
            elapsed_days: elapsed,
            trigger_at: None,
        };
    };

    let due = elapsed >= i64::from(threshold);
    FollowupDecision {
        due,
        threshold_days_used: threshold,
        elapsed_days: elapsed,
        trigger_at: if due {
            trigger_instant(last_touched_at, threshold)
        } else {
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    const DEFAULTS: FollowupThresholds = FollowupThresholds {
        applied_days: 7,
        interview_days: 5,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 20, 15, 30, 0).unwrap()
    }

    #[test]
    fn test_applied_boundary_is_inclusive() {
        let exactly = evaluate(
            PipelineStage::Applied,
            now() - Duration::days(7),
            now(),
            DEFAULTS,
        );
        assert!(exactly.due);
        assert_eq!(exactly.threshold_days_used, 7);
        assert_eq!(exactly.trigger_at, Some(now()));

        let almost = evaluate(
            PipelineStage::Applied,
            now() - (Duration::days(6) + Duration::seconds(1)),
            now(),
            DEFAULTS,
        );
        assert!(!almost.due);
        assert_eq!(almost.elapsed_days, 6);
        assert_eq!(almost.trigger_at, None);
    }

    #[test]
    fn test_interview_stages_share_threshold() {
        for stage in [
            PipelineStage::RecruiterScreen,
            PipelineStage::Technical,
            PipelineStage::Onsite,
        ] {
            let d = evaluate(stage, now() - Duration::days(5), now(), DEFAULTS);
            assert!(d.due, "{stage}");
            assert_eq!(d.threshold_days_used, 5);

            let d = evaluate(stage, now() - Duration::days(4), now(), DEFAULTS);
            assert!(!d.due, "{stage}");
        }
    }

    #[test]
    fn test_inactive_stages_never_due() {
        for stage in [
            PipelineStage::Saved,
            PipelineStage::Offer,
            PipelineStage::Rejected,
            PipelineStage::Ghosted,
        ] {
            let d = evaluate(stage, now() - Duration::days(3650), now(), DEFAULTS);
            assert!(!d.due, "{stage}");
            assert_eq!(d.threshold_days_used, 0);
        }
    }

    #[test]
    fn test_trigger_reflects_staleness_not_scan_time() {
        let touched = now() - Duration::days(30);
        let d = evaluate(PipelineStage::Applied, touched, now(), DEFAULTS);
        assert!(d.due);
        assert_eq!(d.elapsed_days, 30);
        assert_eq!(d.trigger_at, Some(touched + Duration::days(7)));
    }

    #[test]
    fn test_elapsed_floors() {
        let from = now();
        assert_eq!(elapsed_days(from, from + Duration::hours(47)), 1);
        assert_eq!(elapsed_days(from, from), 0);
        assert_eq!(elapsed_days(from, from - Duration::hours(1)), -1);
    }

    #[test]
    fn test_future_touch_is_not_due() {
        let d = evaluate(
            PipelineStage::Applied,
            now() + Duration::hours(2),
            now(),
            DEFAULTS,
        );
        assert!(!d.due);
    }
}
