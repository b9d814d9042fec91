//! Integration tests for the payment flow HTTP endpoints.
//!
//! These tests wire the real axum router with the real Stripe adapter
//! (signature verification is pure computation, no network) and an
//! in-memory unlock repository, then drive the two endpoints the way the
//! payment provider and the client application would.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tower::util::ServiceExt;

use paywall::adapters::http::payments::PaymentsAppState;
use paywall::adapters::http::payments_router;
use paywall::adapters::stripe::{MockPaymentProvider, StripeConfig, StripePaymentAdapter};
use paywall::domain::foundation::{ArticleId, DomainError, UserId};
use paywall::domain::unlock::UnlockRecord;
use paywall::ports::{InsertOutcome, UnlockRepository};

const WEBHOOK_SECRET: &str = "whsec_integration_secret";
const TEST_ARTICLE_ID: &str = "0191d2a5-7a3e-7c41-9e6b-111111111111";

// =============================================================================
// Test Infrastructure
// =============================================================================

/// In-memory unlock repository recording insert attempts.
struct RecordingUnlockRepository {
    records: Mutex<Vec<UnlockRecord>>,
    insert_attempts: Mutex<u32>,
}

impl RecordingUnlockRepository {
    fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            insert_attempts: Mutex::new(0),
        }
    }

    fn attempts(&self) -> u32 {
        *self.insert_attempts.lock().unwrap()
    }

    fn records(&self) -> Vec<UnlockRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl UnlockRepository for RecordingUnlockRepository {
    async fn insert(&self, record: &UnlockRecord) -> Result<InsertOutcome, DomainError> {
        *self.insert_attempts.lock().unwrap() += 1;
        let mut records = self.records.lock().unwrap();
        if records
            .iter()
            .any(|r| r.user_id == record.user_id && r.article_id == record.article_id)
        {
            Ok(InsertOutcome::AlreadyUnlocked)
        } else {
            records.push(record.clone());
            Ok(InsertOutcome::Inserted)
        }
    }

    async fn is_unlocked(
        &self,
        user_id: &UserId,
        article_id: &ArticleId,
    ) -> Result<bool, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .any(|r| &r.user_id == user_id && &r.article_id == article_id))
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UnlockRecord>, DomainError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect())
    }
}

/// App with the real Stripe adapter; webhook verification runs for real.
fn webhook_app(repository: Arc<RecordingUnlockRepository>) -> Router {
    let config = StripeConfig::new("sk_test_key", WEBHOOK_SECRET);
    let state = PaymentsAppState {
        payment_provider: Arc::new(StripePaymentAdapter::new(config)),
        unlock_repository: repository,
    };
    payments_router().with_state(state)
}

/// App with the mock provider; used for the session-creation path so no
/// outbound Stripe call is attempted.
fn checkout_app(provider: Arc<MockPaymentProvider>) -> Router {
    let state = PaymentsAppState {
        payment_provider: provider,
        unlock_repository: Arc::new(RecordingUnlockRepository::new()),
    };
    payments_router().with_state(state)
}

/// Sign a payload the way Stripe does: HMAC-SHA256 over `t=<ts>.<body>`.
fn stripe_signature(secret: &str, timestamp: i64, payload: &str) -> String {
    let signed_payload = format!("{}.{}", timestamp, payload);
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(signed_payload.as_bytes());
    let digest = mac.finalize().into_bytes();
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    format!("t={},v1={}", timestamp, hex)
}

fn completed_checkout_payload(article_id: &str, user_id: Option<&str>) -> String {
    let mut metadata = serde_json::json!({ "articleId": article_id });
    if let Some(user_id) = user_id {
        metadata["userId"] = serde_json::json!(user_id);
    }

    serde_json::json!({
        "id": "evt_integration_1",
        "type": "checkout.session.completed",
        "created": chrono::Utc::now().timestamp(),
        "data": {
            "object": {
                "id": "cs_integration_1",
                "object": "checkout.session",
                "payment_status": "paid",
                "status": "complete",
                "mode": "payment",
                "metadata": metadata
            }
        },
        "livemode": false,
        "pending_webhooks": 1
    })
    .to_string()
}

fn webhook_request(payload: &str, signature: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/stripe-webhook")
        .header("stripe-signature", signature)
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Session Creation
// =============================================================================

#[tokio::test]
async fn checkout_session_created_for_valid_request() {
    let provider = Arc::new(MockPaymentProvider::new());
    let app = checkout_app(provider.clone());

    let body = serde_json::json!({
        "articleId": "42",
        "amount": 9.9,
        "successUrl": "https://example.com/success",
        "cancelUrl": "https://example.com/cancel",
        "userId": "user-1"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/create-stripe-session")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json.get("sessionId").is_some());

    // Minor-unit conversion and metadata pass-through
    let requests = provider.checkout_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].unit_amount, 990);
    assert_eq!(requests[0].article_id, "42");
    assert_eq!(requests[0].user_id.as_deref(), Some("user-1"));
}

#[tokio::test]
async fn non_positive_amount_rejected_without_provider_call() {
    let provider = Arc::new(MockPaymentProvider::new());
    let app = checkout_app(provider.clone());

    let body = serde_json::json!({
        "articleId": "42",
        "amount": -1.0,
        "successUrl": "https://example.com/success",
        "cancelUrl": "https://example.com/cancel",
        "userId": "user-1"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/create-stripe-session")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"error": "Invalid amount"}));
    assert!(provider.checkout_requests().is_empty());
}

#[tokio::test]
async fn wrong_method_on_session_creation_rejected() {
    let provider = Arc::new(MockPaymentProvider::new());
    let app = checkout_app(provider);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/create-stripe-session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Webhook Reconciliation
// =============================================================================

#[tokio::test]
async fn verified_completed_checkout_records_unlock() {
    let repository = Arc::new(RecordingUnlockRepository::new());
    let app = webhook_app(repository.clone());

    let payload = completed_checkout_payload(TEST_ARTICLE_ID, Some("user-1"));
    let signature =
        stripe_signature(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), &payload);

    let response = app
        .oneshot(webhook_request(&payload, &signature))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"received": true}));

    let records = repository.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_id.as_str(), "user-1");
    assert_eq!(records[0].article_id.to_string(), TEST_ARTICLE_ID);
}

#[tokio::test]
async fn forged_signature_rejected_with_no_write() {
    let repository = Arc::new(RecordingUnlockRepository::new());
    let app = webhook_app(repository.clone());

    let payload = completed_checkout_payload(TEST_ARTICLE_ID, Some("user-1"));
    let signature = stripe_signature(
        "whsec_wrong_secret",
        chrono::Utc::now().timestamp(),
        &payload,
    );

    let response = app
        .oneshot(webhook_request(&payload, &signature))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(repository.attempts(), 0);
}

#[tokio::test]
async fn missing_signature_header_rejected() {
    let repository = Arc::new(RecordingUnlockRepository::new());
    let app = webhook_app(repository.clone());

    let payload = completed_checkout_payload(TEST_ARTICLE_ID, Some("user-1"));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/stripe-webhook")
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(repository.attempts(), 0);
}

#[tokio::test]
async fn event_with_missing_metadata_acknowledged_without_write() {
    let repository = Arc::new(RecordingUnlockRepository::new());
    let app = webhook_app(repository.clone());

    let payload = completed_checkout_payload(TEST_ARTICLE_ID, None);
    let signature =
        stripe_signature(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), &payload);

    let response = app
        .oneshot(webhook_request(&payload, &signature))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"received": true}));
    assert_eq!(repository.attempts(), 0);
}

#[tokio::test]
async fn unrelated_event_type_acknowledged_without_write() {
    let repository = Arc::new(RecordingUnlockRepository::new());
    let app = webhook_app(repository.clone());

    let payload = serde_json::json!({
        "id": "evt_other",
        "type": "payment_intent.succeeded",
        "created": chrono::Utc::now().timestamp(),
        "data": { "object": { "id": "pi_1" } },
        "livemode": false,
        "pending_webhooks": 1
    })
    .to_string();
    let signature =
        stripe_signature(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), &payload);

    let response = app
        .oneshot(webhook_request(&payload, &signature))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({"received": true}));
    assert_eq!(repository.attempts(), 0);
}

#[tokio::test]
async fn redelivered_event_attempts_insert_twice_but_keeps_one_row() {
    let repository = Arc::new(RecordingUnlockRepository::new());

    let payload = completed_checkout_payload(TEST_ARTICLE_ID, Some("user-1"));
    let signature =
        stripe_signature(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), &payload);

    for _ in 0..2 {
        let app = webhook_app(repository.clone());
        let response = app
            .oneshot(webhook_request(&payload, &signature))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Two attempts at the handler layer; the conditional insert keeps one row.
    assert_eq!(repository.attempts(), 2);
    assert_eq!(repository.records().len(), 1);
}

#[tokio::test]
async fn wrong_method_on_webhook_rejected() {
    let repository = Arc::new(RecordingUnlockRepository::new());
    let app = webhook_app(repository);

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/stripe-webhook")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
