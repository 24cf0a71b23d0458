//! Billing webhook, entitlement and export endpoints.

use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use jobtrack_auth::StripeSignatureVerifier;

use crate::helpers::TestApp;

fn checkout_completed(user_id: Uuid) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "payment_status": "paid",
                "metadata": { "userId": user_id.to_string() }
            }
        }
    }))
    .unwrap()
}

fn signature(app: &TestApp, payload: &[u8]) -> String {
    StripeSignatureVerifier::from_config(&app.config.billing)
        .unwrap()
        .sign(payload, Utc::now().timestamp())
        .unwrap()
}

#[tokio::test]
async fn test_webhook_unlocks_export() {
    let app = TestApp::new();
    let (user_id, token) = app.sign_in("ada@example.com").await;
    app.request(
        "POST",
        "/api/jobs",
        Some(json!({ "company": "Acme", "role": "SRE", "notes": "said \"hi\"" })),
        Some(&token),
    )
    .await;

    let denied = app.request("GET", "/api/export", None, Some(&token)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let payload = checkout_completed(user_id);
    let header = signature(&app, &payload);
    let ack = app
        .request_raw(
            "POST",
            "/api/billing/webhook",
            &[("stripe-signature", header.as_str())],
            payload,
        )
        .await;
    assert_eq!(ack.status, StatusCode::OK, "{}", ack.text);
    assert_eq!(ack.body["received"], true);

    let entitlement = app
        .request("GET", "/api/billing/entitlement", None, Some(&token))
        .await;
    assert_eq!(entitlement.body["data"]["plan"], "PAID_LIFETIME");

    let csv = app.request("GET", "/api/export", None, Some(&token)).await;
    assert_eq!(csv.status, StatusCode::OK);
    assert!(
        csv.headers[CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv")
    );
    assert!(csv.text.starts_with("Company,Role,Location,Status"));
    assert!(csv.text.contains("\"said \"\"hi\"\"\""));

    let json_export = app
        .request("GET", "/api/export?format=json", None, Some(&token))
        .await;
    assert_eq!(json_export.status, StatusCode::OK);
    assert_eq!(json_export.body["totalJobs"], 1);
}

#[tokio::test]
async fn test_webhook_rejects_bad_signatures() {
    let app = TestApp::new();
    let (user_id, token) = app.sign_in("ada@example.com").await;
    let payload = checkout_completed(user_id);

    let forged = app
        .request_raw(
            "POST",
            "/api/billing/webhook",
            &[("stripe-signature", "t=1,v1=deadbeef")],
            payload.clone(),
        )
        .await;
    assert_eq!(forged.status, StatusCode::FORBIDDEN);

    let unsigned = app
        .request_raw("POST", "/api/billing/webhook", &[], payload)
        .await;
    assert_eq!(unsigned.status, StatusCode::BAD_REQUEST);

    let entitlement = app
        .request("GET", "/api/billing/entitlement", None, Some(&token))
        .await;
    assert_eq!(entitlement.body["data"]["plan"], "FREE");
}

#[tokio::test]
async fn test_unknown_export_format() {
    let app = TestApp::new();
    let (_, token) = app.sign_in("ada@example.com").await;
    let response = app
        .request("GET", "/api/export?format=xml", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
