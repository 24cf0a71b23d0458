//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use jobtrack_api::AppState;
use jobtrack_auth::JwtEncoder;
use jobtrack_core::config::AppConfig;
use jobtrack_core::result::AppResult;
use jobtrack_core::traits::{DeliveryReceipt, Mailer, OutboundEmail};
use jobtrack_database::{MemoryStore, Stores};

pub const CRON_SECRET: &str = "cron-test-secret";
pub const WEBHOOK_SECRET: &str = "whsec_integration";

/// Mail transport that keeps every message in memory.
#[derive(Debug, Default)]
pub struct CapturingMailer {
    outbox: Mutex<Vec<OutboundEmail>>,
}

impl CapturingMailer {
    pub fn outbox(&self) -> Vec<OutboundEmail> {
        self.outbox.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for CapturingMailer {
    fn name(&self) -> &str {
        "capturing"
    }

    async fn send(&self, email: &OutboundEmail) -> AppResult<DeliveryReceipt> {
        let mut outbox = self.outbox.lock().unwrap();
        outbox.push(email.clone());
        Ok(DeliveryReceipt {
            message_id: format!("cap-{}", outbox.len()),
            provider: "capturing".into(),
        })
    }
}

/// Response captured from a test request.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub text: String,
    pub body: Value,
}

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for driving services directly
    pub state: AppState,
    /// Handle on the backing store
    pub store: Arc<MemoryStore>,
    /// Captured notifications
    pub mailer: Arc<CapturingMailer>,
    /// Application config
    pub config: AppConfig,
    encoder: JwtEncoder,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let mut config = AppConfig::for_database_url("postgres://unused@localhost/unused");
        config.server.in_memory = true;
        config.auth.jwt_secret = "integration-secret".into();
        config.auth.cron_secret = CRON_SECRET.into();
        config.billing.webhook_secret = WEBHOOK_SECRET.into();

        let store = Arc::new(MemoryStore::new());
        let stores = Stores::from_memory(store.clone());
        let mailer = Arc::new(CapturingMailer::default());

        let state = AppState::new(config.clone(), &stores, mailer.clone());
        let router = jobtrack_api::build_app(state.clone());

        Self {
            router,
            state,
            store,
            mailer,
            encoder: JwtEncoder::new(&config.auth),
            config,
        }
    }

    /// Bearer token for a fresh identity.
    pub fn token_for(&self, user_id: Uuid, email: &str) -> String {
        self.encoder
            .issue(user_id, email, Duration::hours(1))
            .unwrap()
    }

    /// Provision a user through the API and return its id and token.
    pub async fn sign_in(&self, email: &str) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        let token = self.token_for(user_id, email);
        let response = self.request("GET", "/api/me", None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text);
        (user_id, token)
    }

    /// Send a JSON request
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&json).unwrap())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    /// Send a raw request with arbitrary headers
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }
}
