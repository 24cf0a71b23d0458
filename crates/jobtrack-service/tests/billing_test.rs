//! Entitlements, the billing webhook and paid-only export.

mod common;

use serde_json::json;

use jobtrack_auth::StripeSignatureVerifier;
use jobtrack_core::config::BillingConfig;
use jobtrack_core::error::ErrorKind;
use jobtrack_entity::entitlement::Plan;
use jobtrack_entity::job::PipelineStage;
use jobtrack_service::{ExportFormat, WebhookOutcome};

use common::{Harness, t0};

fn signed_config() -> BillingConfig {
    BillingConfig {
        webhook_secret: "whsec_test".into(),
        ..BillingConfig::default()
    }
}

fn checkout_event(user_id: &str, payment_status: &str) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "id": "evt_1",
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": "cs_test_1",
                "payment_status": payment_status,
                "metadata": { "userId": user_id }
            }
        }
    }))
    .unwrap()
}

fn sign(config: &BillingConfig, payload: &[u8]) -> String {
    StripeSignatureVerifier::from_config(config)
        .unwrap()
        .sign(payload, t0().timestamp())
        .unwrap()
}

#[tokio::test]
async fn test_paid_checkout_upgrades_user() {
    let h = Harness::new();
    let ctx = h.free_user("ada@example.com").await;
    let config = signed_config();
    let billing = h.billing(&config);

    let payload = checkout_event(&ctx.user_id.to_string(), "paid");
    let header = sign(&config, &payload);

    let outcome = billing
        .handle_webhook(&payload, Some(&header), t0())
        .await
        .unwrap();
    assert_eq!(outcome, WebhookOutcome::Upgraded { user_id: ctx.user_id });

    let view = h.entitlements.get_entitlement(ctx.user_id).await.unwrap();
    assert_eq!(view.plan, Plan::PaidLifetime);
    assert!(view.is_paid);

    let again = billing
        .handle_webhook(&payload, Some(&header), t0())
        .await
        .unwrap();
    assert_eq!(again, WebhookOutcome::Upgraded { user_id: ctx.user_id });
}

#[tokio::test]
async fn test_tampered_payload_is_rejected() {
    let h = Harness::new();
    let ctx = h.free_user("ada@example.com").await;
    let config = signed_config();
    let billing = h.billing(&config);

    let header = sign(&config, &checkout_event(&ctx.user_id.to_string(), "unpaid"));
    let forged = checkout_event(&ctx.user_id.to_string(), "paid");

    let err = billing
        .handle_webhook(&forged, Some(&header), t0())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(!h.entitlements.is_paid(ctx.user_id).await.unwrap());
}

#[tokio::test]
async fn test_missing_signature_is_a_bad_request() {
    let h = Harness::new();
    let billing = h.billing(&signed_config());
    let err = billing
        .handle_webhook(b"{}", None, t0())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_unpaid_and_unrelated_events_are_ignored() {
    let h = Harness::new();
    let ctx = h.free_user("ada@example.com").await;
    let billing = h.billing(&BillingConfig::default());

    let unpaid = checkout_event(&ctx.user_id.to_string(), "unpaid");
    let outcome = billing
        .handle_webhook(&unpaid, Some("unsigned"), t0())
        .await
        .unwrap();
    assert!(matches!(outcome, WebhookOutcome::Ignored { .. }));

    let other = serde_json::to_vec(&json!({
        "type": "invoice.paid",
        "data": { "object": {} }
    }))
    .unwrap();
    let outcome = billing
        .handle_webhook(&other, Some("unsigned"), t0())
        .await
        .unwrap();
    assert!(matches!(outcome, WebhookOutcome::Ignored { .. }));

    assert!(!h.entitlements.is_paid(ctx.user_id).await.unwrap());
}

#[tokio::test]
async fn test_checkout_without_user_is_rejected() {
    let h = Harness::new();
    let billing = h.billing(&BillingConfig::default());
    let payload = serde_json::to_vec(&json!({
        "type": "checkout.session.completed",
        "data": { "object": { "payment_status": "paid" } }
    }))
    .unwrap();
    let err = billing
        .handle_webhook(&payload, Some("unsigned"), t0())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_export_is_paid_only() {
    let h = Harness::new();
    let ctx = h.free_user("ada@example.com").await;
    h.job_at(&ctx, "Acme, Inc", PipelineStage::Applied, t0()).await;

    let err = h.export.export_csv(&ctx).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Authorization);
    assert!(err.message.contains("CSV export"));

    h.entitlements
        .upgrade_to_paid_lifetime(ctx.user_id)
        .await
        .unwrap();

    let csv = h.export.export(&ctx, ExportFormat::Csv).await.unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Company,Role,Location,Status"));
    assert!(lines[1].starts_with("\"Acme, Inc\",Backend Engineer,"));

    let json = h.export.export_json(&ctx).await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["totalJobs"], 1);
    assert_eq!(value["jobs"][0]["company"], "Acme, Inc");
}
