//! HTTP adapter for the payment flow endpoints.
//!
//! Exposes the payment-to-unlock reconciliation flow via REST API:
//! - `POST /api/create-stripe-session` - Open a checkout session
//! - `POST /api/stripe-webhook` - Reconcile payment provider events

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{
    CheckoutSessionResponse, CreateCheckoutSessionRequest, ErrorResponse, WebhookAckResponse,
};
pub use handlers::{create_checkout_session, handle_stripe_webhook, PaymentsAppState};
pub use routes::payments_router;
