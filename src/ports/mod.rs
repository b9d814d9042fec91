//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Collaborator Ports
//!
//! - `PaymentProvider` - Checkout-session creation and webhook verification
//! - `UnlockRepository` - Durable, conditional unlock-record persistence
//! - `ArticleRepository` / `ArticleReader` - Article catalogue persistence
//! - `SessionValidator` - Bearer-token validation against the identity provider
//!
//! Handlers receive these as `Arc<dyn Trait>` so every handler is
//! constructible with fakes in tests; no collaborator client lives at
//! module scope.

mod article_reader;
mod article_repository;
mod payment_provider;
mod session_validator;
mod unlock_repository;

pub use article_reader::ArticleReader;
pub use article_repository::ArticleRepository;
pub use payment_provider::{
    CheckoutSession, CreateCheckoutRequest, PaymentError, PaymentErrorCode, PaymentProvider,
    WebhookEvent, WebhookEventData, WebhookEventType,
};
pub use session_validator::SessionValidator;
pub use unlock_repository::{InsertOutcome, UnlockRepository};
