//! Job, resume and settings endpoints.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_job_crud_round() {
    let app = TestApp::new();
    let (_, token) = app.sign_in("ada@example.com").await;

    let created = app
        .request(
            "POST",
            "/api/jobs",
            Some(json!({
                "company": "Acme",
                "role": "Platform Engineer",
                "stage": "APPLIED",
                "url": "https://acme.example.com/jobs/42",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.text);
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let listed = app.request("GET", "/api/jobs", None, Some(&token)).await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);
    assert_eq!(listed.body["data"][0]["company"], "Acme");

    let updated = app
        .request(
            "PUT",
            &format!("/api/jobs/{id}"),
            Some(json!({
                "company": "Acme",
                "role": "Platform Engineer",
                "status": "TECHNICAL",
            })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.text);
    assert_eq!(updated.body["data"]["stage"], "TECHNICAL");

    let touched = app
        .request("POST", &format!("/api/jobs/{id}/touch"), None, Some(&token))
        .await;
    assert_eq!(touched.status, StatusCode::OK);

    let deleted = app
        .request("DELETE", &format!("/api/jobs/{id}"), None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request("GET", &format!("/api/jobs/{id}"), None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_jobs_are_scoped_to_their_owner() {
    let app = TestApp::new();
    let (_, ada) = app.sign_in("ada@example.com").await;
    let (_, bob) = app.sign_in("bob@example.com").await;

    let created = app
        .request(
            "POST",
            "/api/jobs",
            Some(json!({ "company": "Acme", "role": "SRE" })),
            Some(&ada),
        )
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    for (method, path) in [
        ("GET", format!("/api/jobs/{id}")),
        ("DELETE", format!("/api/jobs/{id}")),
        ("POST", format!("/api/jobs/{id}/touch")),
        ("GET", format!("/api/jobs/{id}/reminders")),
    ] {
        let response = app.request(method, &path, None, Some(&bob)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{method} {path}");
    }

    let listed = app.request("GET", "/api/jobs", None, Some(&bob)).await;
    assert!(listed.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_job_is_a_bad_request() {
    let app = TestApp::new();
    let (_, token) = app.sign_in("ada@example.com").await;
    let response = app
        .request(
            "POST",
            "/api/jobs",
            Some(json!({ "company": "Acme", "role": "SRE", "url": "nope" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_free_limit_is_a_conflict() {
    let app = TestApp::new();
    let (_, token) = app.sign_in("ada@example.com").await;
    for i in 0..app.config.billing.free_job_limit {
        let response = app
            .request(
                "POST",
                "/api/jobs",
                Some(json!({ "company": format!("Company {i}"), "role": "SRE" })),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }
    let response = app
        .request(
            "POST",
            "/api/jobs",
            Some(json!({ "company": "Overflow", "role": "SRE" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_referenced_resume_cannot_be_deleted() {
    let app = TestApp::new();
    let (_, token) = app.sign_in("ada@example.com").await;

    let resume = app
        .request(
            "POST",
            "/api/resumes",
            Some(json!({ "name": "Backend CV", "url": "https://cdn.example.com/cv.pdf" })),
            Some(&token),
        )
        .await;
    assert_eq!(resume.status, StatusCode::CREATED);
    let resume_id = resume.body["data"]["id"].as_str().unwrap().to_string();

    let job = app
        .request(
            "POST",
            "/api/jobs",
            Some(json!({
                "company": "Acme",
                "role": "SRE",
                "resume_version_id": resume_id,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(job.status, StatusCode::CREATED);

    let listed = app.request("GET", "/api/jobs", None, Some(&token)).await;
    assert_eq!(listed.body["data"][0]["resume_name"], "Backend CV");

    let response = app
        .request(
            "DELETE",
            &format!("/api/resumes/{resume_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_settings_update() {
    let app = TestApp::new();
    let (_, token) = app.sign_in("ada@example.com").await;

    let response = app
        .request(
            "PUT",
            "/api/settings",
            Some(json!({
                "applied_followup_days": 10,
                "interview_followup_days": 4,
                "reminders_enabled": false,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["applied_followup_days"], 10);
    assert_eq!(response.body["data"]["reminders_enabled"], false);

    let rejected = app
        .request(
            "PUT",
            "/api/settings",
            Some(json!({
                "applied_followup_days": 0,
                "interview_followup_days": 4,
                "reminders_enabled": true,
            })),
            Some(&token),
        )
        .await;
    assert_eq!(rejected.status, StatusCode::BAD_REQUEST);
}
