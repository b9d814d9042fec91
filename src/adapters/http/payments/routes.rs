//! Axum router configuration for payment endpoints.
//!
//! This module defines the route structure for the payment flow and wires
//! the routes to their corresponding handlers.

use axum::{routing::post, Router};

use super::handlers::{create_checkout_session, handle_stripe_webhook, PaymentsAppState};

/// Create the payments API router.
///
/// # Routes
///
/// - `POST /create-stripe-session` - Open a checkout session
/// - `POST /stripe-webhook` - Reconcile payment provider events
///
/// Both routes accept only POST; other methods get 405. Neither requires
/// a bearer token: session creation passes the user id through
/// uninterpreted, and the webhook is authenticated by its signature.
pub fn payments_router() -> Router<PaymentsAppState> {
    Router::new()
        .route("/create-stripe-session", post(create_checkout_session))
        .route("/stripe-webhook", post(handle_stripe_webhook))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::stripe::MockPaymentProvider;
    use crate::domain::foundation::{ArticleId, DomainError, UserId};
    use crate::domain::unlock::UnlockRecord;
    use crate::ports::{InsertOutcome, UnlockRepository};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use std::sync::{Arc, Mutex};
    use tower::util::ServiceExt;

    struct MockUnlockRepository {
        records: Mutex<Vec<UnlockRecord>>,
    }

    #[async_trait]
    impl UnlockRepository for MockUnlockRepository {
        async fn insert(&self, record: &UnlockRecord) -> Result<InsertOutcome, DomainError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(InsertOutcome::Inserted)
        }

        async fn is_unlocked(
            &self,
            _user_id: &UserId,
            _article_id: &ArticleId,
        ) -> Result<bool, DomainError> {
            Ok(false)
        }

        async fn list_for_user(
            &self,
            _user_id: &UserId,
        ) -> Result<Vec<UnlockRecord>, DomainError> {
            Ok(vec![])
        }
    }

    fn test_app() -> Router {
        let state = PaymentsAppState {
            payment_provider: Arc::new(MockPaymentProvider::new()),
            unlock_repository: Arc::new(MockUnlockRepository {
                records: Mutex::new(Vec::new()),
            }),
        };
        payments_router().with_state(state)
    }

    #[tokio::test]
    async fn get_on_session_creation_is_method_not_allowed() {
        let response = test_app()
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

    #[tokio::test]
    async fn get_on_webhook_is_method_not_allowed() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri("/stripe-webhook")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn post_session_creation_round_trips() {
        let body = serde_json::json!({
            "articleId": "42",
            "amount": 9.9,
            "successUrl": "https://example.com/s",
            "cancelUrl": "https://example.com/c",
            "userId": "user-1"
        });

        let response = test_app()
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
    }
}
