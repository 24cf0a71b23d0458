//! Reminder dispatch: delivers due reminders one by one.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use jobtrack_core::error::AppError;
use jobtrack_core::traits::Mailer;
use jobtrack_database::store::ReminderStore;
use jobtrack_entity::reminder::DueReminder;

use super::formatter::ReminderFormatter;

/// What happened to a single reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DispatchStatus {
    /// Transport confirmed acceptance and the reminder was marked sent.
    Sent {
        /// Transport message id.
        message_id: String,
    },
    /// Delivery or bookkeeping failed; the reminder stays pending.
    Failed {
        /// Failure description.
        error: String,
    },
}

/// Per-reminder result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchOutcome {
    /// Reminder identifier.
    pub reminder_id: Uuid,
    /// Result for this reminder.
    #[serde(flatten)]
    pub status: DispatchStatus,
}

/// Summary of one dispatch run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchReport {
    /// Reminders confirmed sent.
    pub sent: u64,
    /// Reminders attempted.
    pub total: u64,
    /// One `"{reminder_id}: {message}"` entry per failure.
    pub errors: Vec<String>,
    /// Per-reminder outcomes, in processing order.
    pub outcomes: Vec<DispatchOutcome>,
    /// Instant the run started.
    pub timestamp: DateTime<Utc>,
}

impl DispatchReport {
    fn fold(outcomes: Vec<DispatchOutcome>, timestamp: DateTime<Utc>) -> Self {
        let init = Self {
            sent: 0,
            total: 0,
            errors: Vec::new(),
            outcomes: Vec::with_capacity(outcomes.len()),
            timestamp,
        };
        outcomes.into_iter().fold(init, |mut report, outcome| {
            report.total += 1;
            match &outcome.status {
                DispatchStatus::Sent { .. } => report.sent += 1,
                DispatchStatus::Failed { error } => report
                    .errors
                    .push(format!("{}: {error}", outcome.reminder_id)),
            }
            report.outcomes.push(outcome);
            report
        })
    }
}

/// Sends a notification for each due reminder and records confirmed
/// deliveries.
///
/// Item failures are collected in the report and never abort the batch;
/// the reminder stays pending and is retried by the next run. Only a
/// failure to load the due set fails the whole call.
#[derive(Debug)]
pub struct ReminderDispatcher {
    reminders: Arc<dyn ReminderStore>,
    mailer: Arc<dyn Mailer>,
    formatter: ReminderFormatter,
    batch_size: i64,
    running: Mutex<()>,
}

impl ReminderDispatcher {
    /// Creates a new dispatcher.
    pub fn new(
        reminders: Arc<dyn ReminderStore>,
        mailer: Arc<dyn Mailer>,
        formatter: ReminderFormatter,
        batch_size: i64,
    ) -> Self {
        Self {
            reminders,
            mailer,
            formatter,
            batch_size: batch_size.max(1),
            running: Mutex::new(()),
        }
    }

    /// Dispatch due reminders as of the current time.
    pub async fn send(&self) -> Result<DispatchReport, AppError> {
        self.send_at(Utc::now()).await
    }

    /// Dispatch reminders due at `now`.
    ///
    /// Fails with `Conflict` if another dispatch is in progress in this
    /// process.
    pub async fn send_at(&self, now: DateTime<Utc>) -> Result<DispatchReport, AppError> {
        let _guard = self
            .running
            .try_lock()
            .map_err(|_| AppError::conflict("Reminder dispatch is already running"))?;

        let due = self.reminders.find_due(now, self.batch_size).await?;

        let mut outcomes = Vec::with_capacity(due.len());
        for reminder in &due {
            let status = self.deliver(reminder, now).await;
            outcomes.push(DispatchOutcome {
                reminder_id: reminder.reminder_id,
                status,
            });
        }

        let report = DispatchReport::fold(outcomes, now);
        info!(
            sent = report.sent,
            total = report.total,
            failed = report.errors.len(),
            "Reminder dispatch finished"
        );
        Ok(report)
    }

    async fn deliver(&self, reminder: &DueReminder, now: DateTime<Utc>) -> DispatchStatus {
        let email = self.formatter.render(reminder, now);

        let receipt = match self.mailer.send(&email).await {
            Ok(receipt) => receipt,
            Err(e) => {
                warn!(
                    reminder_id = %reminder.reminder_id,
                    user_id = %reminder.user_id,
                    transport = self.mailer.name(),
                    error = %e,
                    "Reminder delivery failed"
                );
                return DispatchStatus::Failed { error: e.message };
            }
        };

        match self.reminders.mark_sent(reminder.reminder_id, now).await {
            Ok(true) => {}
            Ok(false) => warn!(
                reminder_id = %reminder.reminder_id,
                "Reminder was no longer pending when marking it sent"
            ),
            Err(e) => {
                warn!(
                    reminder_id = %reminder.reminder_id,
                    message_id = %receipt.message_id,
                    error = %e,
                    "Reminder delivered but could not be marked sent"
                );
                return DispatchStatus::Failed {
                    error: format!(
                        "delivered as {} but not recorded: {}",
                        receipt.message_id, e.message
                    ),
                };
            }
        }

        DispatchStatus::Sent {
            message_id: receipt.message_id,
        }
    }
}
