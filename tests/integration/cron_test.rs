//! Scheduler trigger endpoints end to end.

use axum::http::StatusCode;
use chrono::{Duration, Utc};

use jobtrack_entity::job::PipelineStage;
use jobtrack_service::{JobInput, RequestContext};

use crate::helpers::{CRON_SECRET, TestApp};

#[tokio::test]
async fn test_trigger_requires_secret() {
    let app = TestApp::new();

    let missing = app
        .request("POST", "/api/cron/generate-reminders", None, None)
        .await;
    assert_eq!(missing.status, StatusCode::FORBIDDEN);

    let wrong = app
        .request("GET", "/api/cron/send-reminders", None, Some("guess"))
        .await;
    assert_eq!(wrong.status, StatusCode::FORBIDDEN);

    let ok = app
        .request("GET", "/api/cron/generate-reminders", None, Some(CRON_SECRET))
        .await;
    assert_eq!(ok.status, StatusCode::OK);
    assert_eq!(ok.body["data"]["generated"], 0);
}

#[tokio::test]
async fn test_stale_job_is_reminded_once() {
    let app = TestApp::new();
    let (user_id, token) = app.sign_in("ada@example.com").await;
    app.state
        .entitlement_service
        .upgrade_to_paid_lifetime(user_id)
        .await
        .unwrap();

    let ctx = RequestContext::new(user_id, "ada@example.com");
    let job = app
        .state
        .job_service
        .create_job_at(
            &ctx,
            JobInput {
                company: "Acme".into(),
                role: "SRE".into(),
                stage: PipelineStage::Applied,
                ..Default::default()
            },
            Utc::now() - Duration::days(10),
        )
        .await
        .unwrap();

    let followups = app
        .request("GET", "/api/jobs/followups", None, Some(&token))
        .await;
    assert_eq!(followups.body["data"][0]["id"], job.id.to_string());
    assert_eq!(followups.body["data"][0]["days_since_touch"], 10);

    for _ in 0..2 {
        app.request("POST", "/api/cron/generate-reminders", None, Some(CRON_SECRET))
            .await;
    }
    assert_eq!(app.store.all_reminders().await.len(), 1);

    let sent = app
        .request("POST", "/api/cron/send-reminders", None, Some(CRON_SECRET))
        .await;
    assert_eq!(sent.status, StatusCode::OK, "{}", sent.text);
    assert_eq!(sent.body["data"]["sent"], 1);
    assert_eq!(sent.body["data"]["total"], 1);

    let outbox = app.mailer.outbox();
    assert_eq!(outbox.len(), 1);
    assert_eq!(outbox[0].to, "ada@example.com");
    assert_eq!(outbox[0].subject, "Follow-up reminder: Acme - SRE");

    let again = app
        .request("POST", "/api/cron/send-reminders", None, Some(CRON_SECRET))
        .await;
    assert_eq!(again.body["data"]["total"], 0);

    let reminders = app.request("GET", "/api/reminders", None, Some(&token)).await;
    assert!(!reminders.body["data"][0]["sent_at"].is_null());
}
