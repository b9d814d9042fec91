//! HTTP DTOs (Data Transfer Objects) for payment endpoints.
//!
//! These types define the JSON request/response structure for the payment
//! API. Wire field names are camelCase to match the client application.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to open a checkout session for an article unlock.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutSessionRequest {
    /// Article to unlock.
    pub article_id: String,
    /// Unlock price in major currency units.
    pub amount: f64,
    /// URL to redirect after successful checkout.
    pub success_url: String,
    /// URL to redirect after canceled checkout.
    pub cancel_url: String,
    /// Paying user; optional and passed through uninterpreted.
    #[serde(default)]
    pub user_id: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for successful session creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    /// The provider's checkout session id; the client redirects with it.
    pub session_id: String,
}

/// Acknowledgement returned for every accepted webhook delivery.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub received: bool,
}

impl WebhookAckResponse {
    pub fn received() -> Self {
        Self { received: true }
    }
}

/// Error payload for failed requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
