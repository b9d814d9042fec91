//! CreateCheckoutSessionHandler - Command handler for opening checkout sessions.

use std::sync::Arc;

use crate::domain::article::Price;
use crate::domain::unlock::UnlockError;
use crate::ports::{CheckoutSession, CreateCheckoutRequest, PaymentProvider};

/// Command to open a checkout session for an article unlock.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionCommand {
    /// Article to unlock. Opaque on this path; only named in the product
    /// description and echoed back through session metadata.
    pub article_id: String,
    /// Unlock price in major currency units.
    pub amount: f64,
    /// URL to redirect after successful checkout.
    pub success_url: String,
    /// URL to redirect after canceled checkout.
    pub cancel_url: String,
    /// Paying user. Passed through uninterpreted.
    pub user_id: Option<String>,
}

/// Result of successful session creation.
#[derive(Debug, Clone)]
pub struct CreateCheckoutSessionResult {
    /// Provider's session identifier; the client redirects with it.
    pub session_id: String,
    /// Hosted checkout URL, when the provider returns one.
    pub checkout_url: Option<String>,
}

/// Handler for opening provider-hosted checkout sessions.
///
/// Validates the amount, converts it to minor units, and requests a
/// single-item, single-quantity session with the article and user
/// identifiers attached as metadata for later reconciliation. Provider
/// failures surface to the caller; the client owns retries.
pub struct CreateCheckoutSessionHandler {
    payment_provider: Arc<dyn PaymentProvider>,
}

impl CreateCheckoutSessionHandler {
    pub fn new(payment_provider: Arc<dyn PaymentProvider>) -> Self {
        Self { payment_provider }
    }

    pub async fn handle(
        &self,
        cmd: CreateCheckoutSessionCommand,
    ) -> Result<CreateCheckoutSessionResult, UnlockError> {
        // Reject before touching the provider; unit_amount = round(amount * 100)
        let price =
            Price::new(cmd.amount).map_err(|_| UnlockError::invalid_amount(cmd.amount))?;

        let request = CreateCheckoutRequest {
            article_id: cmd.article_id.clone(),
            user_id: cmd.user_id,
            unit_amount: price.to_minor_units(),
            success_url: cmd.success_url,
            cancel_url: cmd.cancel_url,
        };

        let session: CheckoutSession = self
            .payment_provider
            .create_checkout_session(request)
            .await
            .map_err(|e| {
                tracing::error!(
                    article_id = %cmd.article_id,
                    error = %e,
                    "Failed to create checkout session"
                );
                UnlockError::payment_provider(e.message)
            })?;

        tracing::info!(
            article_id = %cmd.article_id,
            session_id = %session.id,
            "Checkout session created"
        );

        Ok(CreateCheckoutSessionResult {
            session_id: session.id,
            checkout_url: session.url,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{PaymentError, WebhookEvent};
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementation
    // ════════════════════════════════════════════════════════════════════════════

    struct MockPaymentProvider {
        requests: Mutex<Vec<CreateCheckoutRequest>>,
        fail_create: bool,
    }

    impl MockPaymentProvider {
        fn new() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail_create: false,
            }
        }

        fn failing() -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                fail_create: true,
            }
        }

        fn recorded_requests(&self) -> Vec<CreateCheckoutRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentProvider for MockPaymentProvider {
        async fn create_checkout_session(
            &self,
            request: CreateCheckoutRequest,
        ) -> Result<CheckoutSession, PaymentError> {
            self.requests.lock().unwrap().push(request);
            if self.fail_create {
                return Err(PaymentError::provider("Simulated provider outage"));
            }
            Ok(CheckoutSession {
                id: "cs_test_123".to_string(),
                url: Some("https://checkout.stripe.com/c/pay/cs_test_123".to_string()),
            })
        }

        async fn verify_webhook(
            &self,
            _payload: &[u8],
            _signature: &str,
        ) -> Result<WebhookEvent, PaymentError> {
            unreachable!("not exercised by session creation")
        }
    }

    fn command(amount: f64) -> CreateCheckoutSessionCommand {
        CreateCheckoutSessionCommand {
            article_id: "42".to_string(),
            amount,
            success_url: "https://example.com/success".to_string(),
            cancel_url: "https://example.com/cancel".to_string(),
            user_id: Some("user-abc".to_string()),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn zero_amount_rejected_before_provider_call() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(provider.clone());

        let result = handler.handle(command(0.0)).await;

        assert!(matches!(result, Err(UnlockError::InvalidAmount { .. })));
        assert!(provider.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn negative_amount_rejected_before_provider_call() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(provider.clone());

        let result = handler.handle(command(-9.99)).await;

        assert!(matches!(result, Err(UnlockError::InvalidAmount { .. })));
        assert!(provider.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn nan_amount_rejected_before_provider_call() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(provider.clone());

        let result = handler.handle(command(f64::NAN)).await;

        assert!(matches!(result, Err(UnlockError::InvalidAmount { .. })));
        assert!(provider.recorded_requests().is_empty());
    }

    #[tokio::test]
    async fn converts_amount_to_minor_units() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(provider.clone());

        handler.handle(command(9.99)).await.unwrap();

        let requests = provider.recorded_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].unit_amount, 999);
    }

    #[tokio::test]
    async fn metadata_identifiers_pass_through_unchanged() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(provider.clone());

        handler.handle(command(5.0)).await.unwrap();

        let requests = provider.recorded_requests();
        assert_eq!(requests[0].article_id, "42");
        assert_eq!(requests[0].user_id.as_deref(), Some("user-abc"));
    }

    #[tokio::test]
    async fn missing_user_id_is_passed_through() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(provider.clone());

        let mut cmd = command(5.0);
        cmd.user_id = None;
        handler.handle(cmd).await.unwrap();

        assert_eq!(provider.recorded_requests()[0].user_id, None);
    }

    #[tokio::test]
    async fn returns_session_id_on_success() {
        let provider = Arc::new(MockPaymentProvider::new());
        let handler = CreateCheckoutSessionHandler::new(provider);

        let result = handler.handle(command(12.5)).await.unwrap();

        assert_eq!(result.session_id, "cs_test_123");
        assert!(result.checkout_url.is_some());
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_payment_provider_error() {
        let provider = Arc::new(MockPaymentProvider::failing());
        let handler = CreateCheckoutSessionHandler::new(provider);

        let result = handler.handle(command(12.5)).await;

        assert!(matches!(result, Err(UnlockError::PaymentProvider { .. })));
    }
}
