//! Mock payment provider for testing.
//!
//! Provides a configurable mock implementation of `PaymentProvider` for unit
//! and integration tests. Supports:
//! - Pre-configured responses
//! - Error injection
//! - Call tracking
//! - Webhook event simulation

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentProvider, WebhookEvent,
    WebhookEventData, WebhookEventType,
};

/// Mock payment provider for testing.
///
/// # Example
///
/// ```ignore
/// let mock = MockPaymentProvider::new();
///
/// // Configure the event the next webhook verification returns
/// mock.set_webhook_event(event);
///
/// // Inject errors
/// mock.set_error(PaymentError::provider("Test outage"));
///
/// // Assert on recorded calls
/// assert_eq!(mock.checkout_requests().len(), 1);
/// ```
#[derive(Default)]
pub struct MockPaymentProvider {
    /// Inner state (thread-safe for async tests).
    inner: Arc<Mutex<MockState>>,
}

/// Internal mutable state.
#[derive(Default)]
struct MockState {
    /// Next checkout session to return.
    next_checkout: Option<CheckoutSession>,

    /// Next webhook event to return from verification.
    next_webhook_event: Option<WebhookEvent>,

    /// Error to return on next call.
    next_error: Option<PaymentError>,

    /// Recorded checkout-session requests.
    checkout_requests: Vec<CreateCheckoutRequest>,

    /// Recorded webhook verification calls as (payload, signature).
    verify_calls: Vec<(Vec<u8>, String)>,

    /// Always fail webhook verification.
    reject_webhooks: bool,
}

impl MockPaymentProvider {
    /// Create a new mock provider with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock that fails all webhook verifications.
    pub fn rejecting_webhooks() -> Self {
        let mock = Self::new();
        mock.inner.lock().unwrap().reject_webhooks = true;
        mock
    }

    /// Set the checkout session to return on next `create_checkout_session`.
    pub fn set_checkout_session(&self, session: CheckoutSession) {
        self.inner.lock().unwrap().next_checkout = Some(session);
    }

    /// Set the event to return from the next `verify_webhook` call.
    pub fn set_webhook_event(&self, event: WebhookEvent) {
        self.inner.lock().unwrap().next_webhook_event = Some(event);
    }

    /// Inject an error for the next call.
    pub fn set_error(&self, error: PaymentError) {
        self.inner.lock().unwrap().next_error = Some(error);
    }

    /// Recorded checkout-session requests.
    pub fn checkout_requests(&self) -> Vec<CreateCheckoutRequest> {
        self.inner.lock().unwrap().checkout_requests.clone()
    }

    /// Number of webhook verification calls.
    pub fn verify_call_count(&self) -> usize {
        self.inner.lock().unwrap().verify_calls.len()
    }
}

#[async_trait]
impl PaymentProvider for MockPaymentProvider {
    async fn create_checkout_session(
        &self,
        request: CreateCheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        let mut state = self.inner.lock().unwrap();
        state.checkout_requests.push(request);

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(state.next_checkout.take().unwrap_or(CheckoutSession {
            id: "cs_mock_123".to_string(),
            url: Some("https://checkout.stripe.com/c/pay/cs_mock_123".to_string()),
        }))
    }

    async fn verify_webhook(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<WebhookEvent, PaymentError> {
        let mut state = self.inner.lock().unwrap();
        state
            .verify_calls
            .push((payload.to_vec(), signature.to_string()));

        if state.reject_webhooks {
            return Err(PaymentError::invalid_webhook("Invalid signature"));
        }

        if let Some(error) = state.next_error.take() {
            return Err(error);
        }

        Ok(state.next_webhook_event.take().unwrap_or(WebhookEvent {
            id: "evt_mock_123".to_string(),
            event_type: WebhookEventType::CheckoutSessionCompleted,
            data: WebhookEventData::Checkout {
                session_id: "cs_mock_123".to_string(),
                article_id: None,
                user_id: None,
            },
            created_at: 1704067200,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_checkout_requests() {
        let mock = MockPaymentProvider::new();

        mock.create_checkout_session(CreateCheckoutRequest {
            article_id: "42".to_string(),
            user_id: Some("user-1".to_string()),
            unit_amount: 999,
            success_url: "https://example.com/s".to_string(),
            cancel_url: "https://example.com/c".to_string(),
        })
        .await
        .unwrap();

        let requests = mock.checkout_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].unit_amount, 999);
    }

    #[tokio::test]
    async fn returns_configured_session() {
        let mock = MockPaymentProvider::new();
        mock.set_checkout_session(CheckoutSession {
            id: "cs_custom".to_string(),
            url: None,
        });

        let session = mock
            .create_checkout_session(CreateCheckoutRequest {
                article_id: "1".to_string(),
                user_id: None,
                unit_amount: 100,
                success_url: "s".to_string(),
                cancel_url: "c".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(session.id, "cs_custom");
    }

    #[tokio::test]
    async fn injected_error_is_returned_once() {
        let mock = MockPaymentProvider::new();
        mock.set_error(PaymentError::provider("boom"));

        let request = CreateCheckoutRequest {
            article_id: "1".to_string(),
            user_id: None,
            unit_amount: 100,
            success_url: "s".to_string(),
            cancel_url: "c".to_string(),
        };

        assert!(mock.create_checkout_session(request.clone()).await.is_err());
        assert!(mock.create_checkout_session(request).await.is_ok());
    }

    #[tokio::test]
    async fn rejecting_mock_fails_verification() {
        let mock = MockPaymentProvider::rejecting_webhooks();

        let result = mock.verify_webhook(b"{}", "t=1,v1=aa").await;

        assert!(result.is_err());
        assert_eq!(mock.verify_call_count(), 1);
    }
}
