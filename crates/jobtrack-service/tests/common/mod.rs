//! Shared fixtures for service behaviour tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::Notify;
use uuid::Uuid;

use jobtrack_core::config::{BillingConfig, ReminderConfig};
use jobtrack_core::error::AppError;
use jobtrack_core::result::AppResult;
use jobtrack_core::traits::{DeliveryReceipt, Mailer, OutboundEmail};
use jobtrack_database::{JobStore, MemoryStore, Stores, TouchOutcome};
use jobtrack_entity::entitlement::Plan;
use jobtrack_entity::job::{JobApplication, JobWithResume, PipelineStage};
use jobtrack_service::{
    BillingService, EntitlementService, ExportService, JobInput, JobService, ReminderDispatcher,
    ReminderFormatter, ReminderGenerator, RequestContext, ResumeService, SettingsService,
    UserService,
};

/// Fixed starting instant for every scenario.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

pub fn days(n: i64) -> Duration {
    Duration::days(n)
}

/// Records every message and fails for configured recipients or
/// subjects.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    fail_when_contains: Mutex<Vec<String>>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail any message whose recipient or subject contains `needle`.
    pub fn fail_on(&self, needle: &str) {
        self.fail_when_contains.lock().unwrap().push(needle.to_string());
    }

    pub fn heal(&self) {
        self.fail_when_contains.lock().unwrap().clear();
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, email: &OutboundEmail) -> AppResult<DeliveryReceipt> {
        let failing = self
            .fail_when_contains
            .lock()
            .unwrap()
            .iter()
            .any(|n| email.to.contains(n.as_str()) || email.subject.contains(n.as_str()));
        if failing {
            return Err(AppError::external_service(format!(
                "transport rejected message to {}",
                email.to
            )));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(email.clone());
        Ok(DeliveryReceipt {
            message_id: format!("msg-{}", sent.len()),
            provider: "recording".into(),
        })
    }
}

/// Blocks inside `send` until released, to hold a dispatch run open.
#[derive(Debug, Default)]
pub struct GateMailer {
    pub entered: Notify,
    pub release: Notify,
}

#[async_trait]
impl Mailer for GateMailer {
    fn name(&self) -> &str {
        "gate"
    }

    async fn send(&self, _email: &OutboundEmail) -> AppResult<DeliveryReceipt> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(DeliveryReceipt {
            message_id: "gate-1".into(),
            provider: "gate".into(),
        })
    }
}

/// Job store that blocks in `list_active_for_user` until released, to
/// hold a generation run open.
#[derive(Debug)]
pub struct GatedJobs {
    inner: Arc<MemoryStore>,
    pub entered: Notify,
    pub release: Notify,
}

impl GatedJobs {
    pub fn new(inner: Arc<MemoryStore>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            entered: Notify::new(),
            release: Notify::new(),
        })
    }
}

#[async_trait]
impl JobStore for GatedJobs {
    async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<JobWithResume>> {
        JobStore::list_for_user(&*self.inner, user_id).await
    }

    async fn list_active_for_user(&self, user_id: Uuid) -> AppResult<Vec<JobApplication>> {
        self.entered.notify_one();
        self.release.notified().await;
        self.inner.list_active_for_user(user_id).await
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        job_id: Uuid,
    ) -> AppResult<Option<JobApplication>> {
        JobStore::find_for_user(&*self.inner, user_id, job_id).await
    }

    async fn count_for_user(&self, user_id: Uuid) -> AppResult<i64> {
        self.inner.count_for_user(user_id).await
    }

    async fn count_referencing_resume(&self, user_id: Uuid, resume_id: Uuid) -> AppResult<i64> {
        self.inner.count_referencing_resume(user_id, resume_id).await
    }

    async fn insert(&self, job: &JobApplication) -> AppResult<JobApplication> {
        JobStore::insert(&*self.inner, job).await
    }

    async fn update(&self, job: &JobApplication) -> AppResult<Option<JobApplication>> {
        JobStore::update(&*self.inner, job).await
    }

    async fn delete(&self, user_id: Uuid, job_id: Uuid) -> AppResult<bool> {
        JobStore::delete(&*self.inner, user_id, job_id).await
    }

    async fn touch(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<Option<TouchOutcome>> {
        self.inner.touch(user_id, job_id, now).await
    }
}

/// Every service wired against one in-memory store.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub stores: Stores,
    pub users: UserService,
    pub jobs: JobService,
    pub resumes: ResumeService,
    pub settings: SettingsService,
    pub entitlements: EntitlementService,
    pub export: ExportService,
    pub generator: ReminderGenerator,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_billing(BillingConfig::default())
    }

    pub fn with_billing(billing: BillingConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let stores = Stores::from_memory(store.clone());
        let reminder_config = ReminderConfig::default();
        let entitlements = EntitlementService::new(&stores);
        Self {
            users: UserService::new(&stores, reminder_config.clone()),
            jobs: JobService::new(&stores, billing.free_job_limit),
            resumes: ResumeService::new(&stores),
            settings: SettingsService::new(&stores, reminder_config),
            export: ExportService::new(&stores, entitlements.clone()),
            generator: ReminderGenerator::new(
                stores.settings.clone(),
                stores.jobs.clone(),
                stores.reminders.clone(),
            ),
            entitlements,
            store,
            stores,
        }
    }

    pub fn billing(&self, config: &BillingConfig) -> BillingService {
        BillingService::new(self.entitlements.clone(), config)
    }

    pub fn dispatcher(&self, mailer: Arc<dyn Mailer>, batch_size: i64) -> ReminderDispatcher {
        ReminderDispatcher::new(
            self.stores.reminders.clone(),
            mailer,
            ReminderFormatter::new("https://jobs.example.com"),
            batch_size,
        )
    }

    /// Provision a FREE user at `t0`.
    pub async fn free_user(&self, email: &str) -> RequestContext {
        let id = Uuid::new_v4();
        self.users
            .ensure_provisioned_at(id, email, t0())
            .await
            .unwrap();
        RequestContext::at(id, email, t0())
    }

    /// Provision a user holding the lifetime plan.
    pub async fn paid_user(&self, email: &str) -> RequestContext {
        let ctx = self.free_user(email).await;
        self.entitlements
            .set_plan_at(ctx.user_id, Plan::PaidLifetime, t0())
            .await
            .unwrap();
        ctx
    }

    /// Create a job touched at `at`.
    pub async fn job_at(
        &self,
        ctx: &RequestContext,
        company: &str,
        stage: PipelineStage,
        at: DateTime<Utc>,
    ) -> JobApplication {
        self.jobs
            .create_job_at(ctx, job_input(company, stage), at)
            .await
            .unwrap()
    }
}

pub fn job_input(company: &str, stage: PipelineStage) -> JobInput {
    JobInput {
        company: company.into(),
        role: "Backend Engineer".into(),
        stage,
        ..Default::default()
    }
}
