//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use jobtrack_auth::{JwtDecoder, TriggerGuard};
use jobtrack_core::config::AppConfig;
use jobtrack_core::traits::Mailer;
use jobtrack_database::Stores;
use jobtrack_service::{
    BillingService, EntitlementService, ExportService, JobService, ReminderDispatcher,
    ReminderFormatter, ReminderGenerator, ResumeService, SettingsService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Auth ─────────────────────────────────────────────────
    /// Bearer token decoder
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Scheduler trigger secret check
    pub trigger_guard: Arc<TriggerGuard>,

    // ── Services ─────────────────────────────────────────────
    /// User provisioning
    pub user_service: Arc<UserService>,
    /// Job lifecycle
    pub job_service: Arc<JobService>,
    /// Resume versions
    pub resume_service: Arc<ResumeService>,
    /// Reminder settings
    pub settings_service: Arc<SettingsService>,
    /// Plan resolution
    pub entitlement_service: Arc<EntitlementService>,
    /// Billing webhook
    pub billing_service: Arc<BillingService>,
    /// Data export
    pub export_service: Arc<ExportService>,

    // ── Reminder engine ──────────────────────────────────────
    /// Reminder generator
    pub generator: Arc<ReminderGenerator>,
    /// Reminder dispatcher
    pub dispatcher: Arc<ReminderDispatcher>,
}

impl AppState {
    /// Wire every service from configuration, a store bundle and a mail
    /// transport.
    pub fn new(config: AppConfig, stores: &Stores, mailer: Arc<dyn Mailer>) -> Self {
        let entitlement_service = EntitlementService::new(stores);
        let formatter = ReminderFormatter::new(&config.mail.app_base_url);

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            trigger_guard: Arc::new(TriggerGuard::new(&config.auth)),
            user_service: Arc::new(UserService::new(stores, config.reminders.clone())),
            job_service: Arc::new(JobService::new(stores, config.billing.free_job_limit)),
            resume_service: Arc::new(ResumeService::new(stores)),
            settings_service: Arc::new(SettingsService::new(stores, config.reminders.clone())),
            billing_service: Arc::new(BillingService::new(
                entitlement_service.clone(),
                &config.billing,
            )),
            export_service: Arc::new(ExportService::new(stores, entitlement_service.clone())),
            entitlement_service: Arc::new(entitlement_service),
            generator: Arc::new(ReminderGenerator::new(
                stores.settings.clone(),
                stores.jobs.clone(),
                stores.reminders.clone(),
            )),
            dispatcher: Arc::new(ReminderDispatcher::new(
                stores.reminders.clone(),
                mailer,
                formatter,
                config.reminders.dispatch_batch_size,
            )),
            config: Arc::new(config),
        }
    }
}
