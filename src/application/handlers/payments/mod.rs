//! Payment flow handlers.
//!
//! The two halves of the payment-to-unlock reconciliation flow:
//!
//! - `CreateCheckoutSessionHandler` opens a provider-hosted checkout
//!   session with reconciliation metadata attached.
//! - `HandlePaymentWebhookHandler` verifies inbound provider events and
//!   translates completed checkouts into durable unlock records.

mod create_checkout_session;
mod handle_payment_webhook;

pub use create_checkout_session::{
    CreateCheckoutSessionCommand, CreateCheckoutSessionHandler, CreateCheckoutSessionResult,
};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, HandlePaymentWebhookResult,
};
