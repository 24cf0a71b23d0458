//! CSV and JSON export of a user's job applications.

use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use jobtrack_core::error::AppError;
use jobtrack_database::store::{JobStore, Stores};
use jobtrack_entity::job::{JobWithResume, PipelineStage};

use super::csv;
use crate::billing::EntitlementService;
use crate::context::RequestContext;

const CSV_HEADERS: [&str; 12] = [
    "Company",
    "Role",
    "Location",
    "Status",
    "Applied Date",
    "Salary",
    "Resume",
    "Notes",
    "URL",
    "Last Touched",
    "Created",
    "ID",
];

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma separated values.
    Csv,
    /// Pretty printed JSON document.
    Json,
}

impl ExportFormat {
    /// MIME type of the rendered document.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv; charset=utf-8",
            Self::Json => "application/json",
        }
    }

    /// Download file name for an export taken at `now`.
    pub fn file_name(&self, now: DateTime<Utc>) -> String {
        let ext = match self {
            Self::Csv => "csv",
            Self::Json => "json",
        };
        format!("job-applications-{}.{ext}", now.format("%Y-%m-%d"))
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(AppError::validation(format!("Unknown export format '{other}'"))),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportDocument {
    export_date: String,
    total_jobs: usize,
    jobs: Vec<ExportedJob>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportedJob {
    id: Uuid,
    company: String,
    role: String,
    location: Option<String>,
    url: Option<String>,
    status: PipelineStage,
    applied_date: Option<String>,
    salary: Option<String>,
    notes: Option<String>,
    resume: Option<ExportedResume>,
    last_touched_at: String,
    created_at: String,
}

#[derive(Debug, Serialize)]
struct ExportedResume {
    id: Uuid,
    name: String,
}

impl From<JobWithResume> for ExportedJob {
    fn from(row: JobWithResume) -> Self {
        let job = row.job;
        let resume = job
            .resume_version_id
            .zip(row.resume_name)
            .map(|(id, name)| ExportedResume { id, name });
        Self {
            id: job.id,
            company: job.company,
            role: job.role,
            location: job.location,
            url: job.url,
            status: job.stage,
            applied_date: job.applied_date.map(timestamp),
            salary: job.salary,
            notes: job.notes,
            resume,
            last_touched_at: timestamp(job.last_touched_at),
            created_at: timestamp(job.created_at),
        }
    }
}

fn timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Exports the caller's job applications. Paid users only.
#[derive(Debug, Clone)]
pub struct ExportService {
    jobs: Arc<dyn JobStore>,
    entitlements: EntitlementService,
}

impl ExportService {
    /// Creates a new export service.
    pub fn new(stores: &Stores, entitlements: EntitlementService) -> Self {
        Self {
            jobs: stores.jobs.clone(),
            entitlements,
        }
    }

    /// Render all of the caller's jobs in `format`.
    pub async fn export(
        &self,
        ctx: &RequestContext,
        format: ExportFormat,
    ) -> Result<String, AppError> {
        let feature = match format {
            ExportFormat::Csv => "CSV export",
            ExportFormat::Json => "JSON export",
        };
        self.entitlements.require_paid(ctx.user_id, feature).await?;

        let jobs = self.jobs.list_for_user(ctx.user_id).await?;
        info!(user_id = %ctx.user_id, jobs = jobs.len(), format = ?format, "Exporting jobs");

        match format {
            ExportFormat::Csv => Ok(render_csv(jobs)),
            ExportFormat::Json => render_json(jobs, ctx.request_time),
        }
    }

    /// CSV export.
    pub async fn export_csv(&self, ctx: &RequestContext) -> Result<String, AppError> {
        self.export(ctx, ExportFormat::Csv).await
    }

    /// JSON export.
    pub async fn export_json(&self, ctx: &RequestContext) -> Result<String, AppError> {
        self.export(ctx, ExportFormat::Json).await
    }
}

fn render_csv(jobs: Vec<JobWithResume>) -> String {
    let mut lines = Vec::with_capacity(jobs.len() + 1);
    lines.push(csv::record(CSV_HEADERS));
    for row in jobs {
        let job = &row.job;
        lines.push(csv::record([
            job.company.clone(),
            job.role.clone(),
            job.location.clone().unwrap_or_default(),
            job.stage.to_string(),
            job.applied_date.map(timestamp).unwrap_or_default(),
            job.salary.clone().unwrap_or_default(),
            row.resume_name.clone().unwrap_or_default(),
            job.notes.clone().unwrap_or_default(),
            job.url.clone().unwrap_or_default(),
            timestamp(job.last_touched_at),
            timestamp(job.created_at),
            job.id.to_string(),
        ]));
    }
    lines.join("\n")
}

fn render_json(jobs: Vec<JobWithResume>, now: DateTime<Utc>) -> Result<String, AppError> {
    let document = ExportDocument {
        export_date: timestamp(now),
        total_jobs: jobs.len(),
        jobs: jobs.into_iter().map(ExportedJob::from).collect(),
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use jobtrack_entity::job::{JobApplication, JobDraft};

    fn row(company: &str, notes: Option<&str>) -> JobWithResume {
        let now = Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap();
        let job = JobApplication::create(
            Uuid::nil(),
            JobDraft {
                company: company.into(),
                role: "Engineer".into(),
                location: None,
                url: None,
                stage: PipelineStage::Applied,
                applied_date: None,
                salary: None,
                notes: notes.map(Into::into),
                resume_version_id: None,
            },
            now,
        );
        JobWithResume {
            job,
            resume_name: None,
        }
    }

    #[test]
    fn test_csv_layout() {
        let out = render_csv(vec![row("Acme, Inc", Some("line1\nline2"))]);
        let mut lines = out.splitn(2, '\n');
        assert_eq!(
            lines.next().unwrap(),
            "Company,Role,Location,Status,Applied Date,Salary,Resume,Notes,URL,Last Touched,Created,ID"
        );
        let body = lines.next().unwrap();
        assert!(body.starts_with("\"Acme, Inc\",Engineer,,APPLIED,,,,\"line1\nline2\",,"));
        assert!(body.contains("2026-02-03T04:05:06.000Z"));
    }

    #[test]
    fn test_json_shape() {
        let now = Utc.with_ymd_and_hms(2026, 2, 4, 0, 0, 0).unwrap();
        let out = render_json(vec![row("Acme", None)], now).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["exportDate"], "2026-02-04T00:00:00.000Z");
        assert_eq!(value["totalJobs"], 1);
        assert_eq!(value["jobs"][0]["company"], "Acme");
        assert_eq!(value["jobs"][0]["status"], "APPLIED");
        assert!(value["jobs"][0]["resume"].is_null());
        assert_eq!(value["jobs"][0]["lastTouchedAt"], "2026-02-03T04:05:06.000Z");
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
