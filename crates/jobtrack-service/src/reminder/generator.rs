//! Reminder generation: materializes follow-up reminders for stale jobs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use jobtrack_core::error::AppError;
use jobtrack_database::store::{JobStore, ReminderStore, SettingsStore};
use jobtrack_entity::reminder::Reminder;

use super::policy::{self, FollowupThresholds};

/// Summary of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Reminders inserted by this run.
    pub generated: u64,
    /// Users whose jobs were scanned.
    pub users_scanned: u64,
    /// Active jobs evaluated.
    pub jobs_evaluated: u64,
    /// Instant the run evaluated staleness against.
    pub timestamp: DateTime<Utc>,
}

/// Scans every eligible user's active jobs and creates at most one pending
/// follow-up reminder per job and staleness window.
///
/// Runs are idempotent: a job that already has a reminder covering its
/// current window is skipped. Infrastructure errors abort the run; since
/// inserts are idempotent the next trigger resumes safely.
#[derive(Debug)]
pub struct ReminderGenerator {
    settings: Arc<dyn SettingsStore>,
    jobs: Arc<dyn JobStore>,
    reminders: Arc<dyn ReminderStore>,
    running: Mutex<()>,
}

impl ReminderGenerator {
    /// Creates a new generator.
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        jobs: Arc<dyn JobStore>,
        reminders: Arc<dyn ReminderStore>,
    ) -> Self {
        Self {
            settings,
            jobs,
            reminders,
            running: Mutex::new(()),
        }
    }

    /// Run generation against the current time.
    pub async fn generate(&self) -> Result<GenerationReport, AppError> {
        self.generate_at(Utc::now()).await
    }

    /// Run generation as of `now`.
    ///
    /// Fails with `Conflict` if another run is in progress in this process.
    pub async fn generate_at(&self, now: DateTime<Utc>) -> Result<GenerationReport, AppError> {
        let _guard = self
            .running
            .try_lock()
            .map_err(|_| AppError::conflict("Reminder generation is already running"))?;

        let eligible = self.settings.find_reminder_eligible().await?;
        let mut report = GenerationReport {
            generated: 0,
            users_scanned: 0,
            jobs_evaluated: 0,
            timestamp: now,
        };

        for settings in &eligible {
            let thresholds = FollowupThresholds::from(settings);
            let jobs = self.jobs.list_active_for_user(settings.user_id).await?;
            report.users_scanned += 1;

            for job in jobs {
                if job.user_id != settings.user_id {
                    warn!(
                        user_id = %settings.user_id,
                        job_id = %job.id,
                        "Skipping job not owned by the scanned user"
                    );
                    continue;
                }
                report.jobs_evaluated += 1;

                let decision = policy::evaluate(job.stage, job.last_touched_at, now, thresholds);
                let Some(trigger_at) = decision.trigger_at else {
                    continue;
                };

                let reminder = Reminder::follow_up(job.user_id, job.id, trigger_at, now);
                if self
                    .reminders
                    .insert_if_absent(&reminder, job.last_touched_at)
                    .await?
                {
                    debug!(
                        user_id = %job.user_id,
                        job_id = %job.id,
                        reminder_id = %reminder.id,
                        trigger_at = %trigger_at,
                        elapsed_days = decision.elapsed_days,
                        "Follow-up reminder created"
                    );
                    report.generated += 1;
                }
            }
        }

        info!(
            generated = report.generated,
            users = report.users_scanned,
            jobs = report.jobs_evaluated,
            "Reminder generation finished"
        );
        Ok(report)
    }
}
