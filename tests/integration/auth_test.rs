//! Identity resolution at the HTTP boundary.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/jobs", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/api/jobs", None, Some("not.a.jwt"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_first_request_provisions_a_free_user() {
    let app = TestApp::new();
    let user_id = Uuid::new_v4();
    let token = app.token_for(user_id, "ada@example.com");

    let response = app.request("GET", "/api/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["id"], user_id.to_string());
    assert_eq!(response.body["data"]["email"], "ada@example.com");
    assert_eq!(response.body["data"]["entitlement"]["plan"], "FREE");
    assert_eq!(response.body["data"]["entitlement"]["is_paid"], false);

    let settings = app.request("GET", "/api/settings", None, Some(&token)).await;
    assert_eq!(settings.status, StatusCode::OK);
    assert_eq!(settings.body["data"]["applied_followup_days"], 7);
    assert_eq!(settings.body["data"]["interview_followup_days"], 5);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["in_memory"], true);
}
