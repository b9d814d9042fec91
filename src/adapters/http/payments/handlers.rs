//! HTTP handlers for payment endpoints.
//!
//! These handlers connect Axum routes to application layer command handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::payments::{
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler, HandlePaymentWebhookCommand,
    HandlePaymentWebhookHandler,
};
use crate::domain::unlock::UnlockError;
use crate::ports::{PaymentProvider, UnlockRepository};

use super::dto::{
    CheckoutSessionResponse, CreateCheckoutSessionRequest, ErrorResponse, WebhookAckResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing the payment flow dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped
/// dependencies for efficient sharing across handlers.
#[derive(Clone)]
pub struct PaymentsAppState {
    pub payment_provider: Arc<dyn PaymentProvider>,
    pub unlock_repository: Arc<dyn UnlockRepository>,
}

impl PaymentsAppState {
    /// Create handlers on demand from the shared state.
    pub fn checkout_handler(&self) -> CreateCheckoutSessionHandler {
        CreateCheckoutSessionHandler::new(self.payment_provider.clone())
    }

    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.payment_provider.clone(),
            self.unlock_repository.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/create-stripe-session - Open a checkout session
pub async fn create_checkout_session(
    State(state): State<PaymentsAppState>,
    Json(request): Json<CreateCheckoutSessionRequest>,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let handler = state.checkout_handler();
    let cmd = CreateCheckoutSessionCommand {
        article_id: request.article_id,
        amount: request.amount,
        success_url: request.success_url,
        cancel_url: request.cancel_url,
        user_id: request.user_id,
    };

    let result = handler.handle(cmd).await?;

    let response = CheckoutSessionResponse {
        session_id: result.session_id,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// POST /api/stripe-webhook - Reconcile payment provider events
///
/// Reads the raw body: signature verification needs the exact byte stream
/// as delivered, not a re-serialized form. Every verified event is
/// acknowledged with `{received: true}` regardless of business outcome;
/// only missing/invalid signature material produces an error status.
pub async fn handle_stripe_webhook(
    State(state): State<PaymentsAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, PaymentsApiError> {
    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(UnlockError::missing_signature)?;

    let handler = state.webhook_handler();
    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature: signature.to_string(),
    };

    handler.handle(cmd).await?;

    Ok((StatusCode::OK, Json(WebhookAckResponse::received())))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts payment flow errors to HTTP responses.
pub struct PaymentsApiError(UnlockError);

impl From<UnlockError> for PaymentsApiError {
    fn from(err: UnlockError) -> Self {
        Self(err)
    }
}

impl IntoResponse for PaymentsApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            UnlockError::InvalidAmount { .. } => StatusCode::BAD_REQUEST,
            UnlockError::MissingSignature => StatusCode::BAD_REQUEST,
            UnlockError::InvalidWebhookSignature { .. } => StatusCode::BAD_REQUEST,
            UnlockError::PaymentProvider { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            UnlockError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.message());
        (status, Json(body)).into_response()
    }
}
