//! Unlock and payment-flow error types.
//!
//! Errors for checkout-session creation and webhook reconciliation.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidAmount | 400 |
//! | MissingSignature | 400 |
//! | InvalidWebhookSignature | 400 |
//! | PaymentProvider | 500 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors on the payment-to-unlock path.
#[derive(Debug, Clone, PartialEq)]
pub enum UnlockError {
    /// Checkout amount was zero, negative, or not a number.
    InvalidAmount { amount: f64 },

    /// Webhook request carried no signature header, or no signing secret
    /// is configured.
    MissingSignature,

    /// Webhook signature verification failed; the event is untrusted and
    /// must not reach the write path.
    InvalidWebhookSignature { reason: String },

    /// The payment provider rejected or failed a request.
    PaymentProvider { reason: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl UnlockError {
    pub fn invalid_amount(amount: f64) -> Self {
        UnlockError::InvalidAmount { amount }
    }

    pub fn missing_signature() -> Self {
        UnlockError::MissingSignature
    }

    pub fn invalid_webhook_signature(reason: impl Into<String>) -> Self {
        UnlockError::InvalidWebhookSignature {
            reason: reason.into(),
        }
    }

    pub fn payment_provider(reason: impl Into<String>) -> Self {
        UnlockError::PaymentProvider {
            reason: reason.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        UnlockError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            UnlockError::InvalidAmount { .. } => ErrorCode::ValidationFailed,
            UnlockError::MissingSignature => ErrorCode::ValidationFailed,
            UnlockError::InvalidWebhookSignature { .. } => ErrorCode::ValidationFailed,
            UnlockError::PaymentProvider { .. } => ErrorCode::PaymentProviderError,
            UnlockError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-friendly error message.
    pub fn message(&self) -> String {
        match self {
            UnlockError::InvalidAmount { .. } => "Invalid amount".to_string(),
            UnlockError::MissingSignature => {
                "Missing webhook signature or secret".to_string()
            }
            UnlockError::InvalidWebhookSignature { reason } => {
                format!("Webhook Error: {}", reason)
            }
            UnlockError::PaymentProvider { reason } => reason.clone(),
            UnlockError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for UnlockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for UnlockError {}

impl From<DomainError> for UnlockError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::PaymentProviderError | ErrorCode::ExternalServiceError => {
                UnlockError::PaymentProvider {
                    reason: err.to_string(),
                }
            }
            _ => UnlockError::Infrastructure(err.to_string()),
        }
    }
}

impl From<UnlockError> for DomainError {
    fn from(err: UnlockError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
