//! HandlePaymentWebhookHandler - Command handler for reconciling payment events.

use std::sync::Arc;

use crate::domain::foundation::{ArticleId, UserId};
use crate::domain::unlock::{UnlockError, UnlockRecord};
use crate::ports::{
    InsertOutcome, PaymentProvider, UnlockRepository, WebhookEvent, WebhookEventData,
    WebhookEventType,
};

/// Command to reconcile a payment provider webhook.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw webhook payload, exactly as delivered. Signature verification
    /// runs over these bytes.
    pub payload: Vec<u8>,
    /// Webhook signature header.
    pub signature: String,
}

/// Result of webhook reconciliation.
///
/// Every variant is acknowledged to the provider with a success response;
/// only a verification failure produces an error.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlePaymentWebhookResult {
    /// Completed checkout recorded as a new unlock.
    UnlockRecorded { user_id: String, article_id: String },
    /// Redelivered checkout; the unlock already existed and the insert
    /// no-oped on conflict.
    AlreadyUnlocked { user_id: String, article_id: String },
    /// Completed checkout acknowledged without a write (unusable metadata
    /// or a swallowed persistence failure).
    Acknowledged,
    /// Event type carries no business action.
    Ignored,
}

/// Handler for reconciling payment provider webhooks into unlock records.
///
/// The signature check is the sole authentication boundary on this path;
/// no business logic runs on an unverified event. After verification the
/// handler attempts one conditional insert per delivery - redelivered
/// events attempt again and the repository no-ops on conflict.
///
/// Persistence failures are logged and swallowed: the provider requires a
/// timely success acknowledgement regardless of business outcome, or it
/// retries delivery indefinitely. Lost unlocks surface through logs.
pub struct HandlePaymentWebhookHandler {
    payment_provider: Arc<dyn PaymentProvider>,
    unlock_repository: Arc<dyn UnlockRepository>,
}

impl HandlePaymentWebhookHandler {
    pub fn new(
        payment_provider: Arc<dyn PaymentProvider>,
        unlock_repository: Arc<dyn UnlockRepository>,
    ) -> Self {
        Self {
            payment_provider,
            unlock_repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<HandlePaymentWebhookResult, UnlockError> {
        // 1. Verify webhook signature and parse event
        let event = self
            .payment_provider
            .verify_webhook(&cmd.payload, &cmd.signature)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Webhook signature verification failed");
                UnlockError::invalid_webhook_signature(e.message)
            })?;

        tracing::info!(
            event_id = %event.id,
            event_type = ?event.event_type,
            "Webhook event verified"
        );

        // 2. Process based on event type
        match event.event_type {
            WebhookEventType::CheckoutSessionCompleted => {
                self.handle_checkout_completed(&event).await
            }
            WebhookEventType::Unknown(_) => Ok(HandlePaymentWebhookResult::Ignored),
        }
    }

    async fn handle_checkout_completed(
        &self,
        event: &WebhookEvent,
    ) -> Result<HandlePaymentWebhookResult, UnlockError> {
        let (session_id, article_id, user_id) = match &event.data {
            WebhookEventData::Checkout {
                session_id,
                article_id,
                user_id,
            } => (session_id, article_id.as_deref(), user_id.as_deref()),
            _ => {
                tracing::warn!(
                    event_id = %event.id,
                    "Unexpected payload shape for completed checkout"
                );
                return Ok(HandlePaymentWebhookResult::Acknowledged);
            }
        };

        // A malformed or legacy session must not crash the handler or keep
        // the provider retrying.
        let (Some(article_raw), Some(user_raw)) = (article_id, user_id) else {
            tracing::warn!(
                event_id = %event.id,
                session_id = %session_id,
                "Missing articleId or userId in session metadata"
            );
            return Ok(HandlePaymentWebhookResult::Acknowledged);
        };

        let Ok(article_id) = article_raw.parse::<ArticleId>() else {
            tracing::warn!(
                event_id = %event.id,
                article_id = %article_raw,
                "Unparseable articleId in session metadata"
            );
            return Ok(HandlePaymentWebhookResult::Acknowledged);
        };

        let Ok(user_id) = UserId::new(user_raw) else {
            tracing::warn!(event_id = %event.id, "Empty userId in session metadata");
            return Ok(HandlePaymentWebhookResult::Acknowledged);
        };

        let record = UnlockRecord::new(user_id.clone(), article_id);

        match self.unlock_repository.insert(&record).await {
            Ok(InsertOutcome::Inserted) => {
                tracing::info!(
                    event_id = %event.id,
                    user_id = %user_id,
                    article_id = %article_id,
                    "Unlock recorded"
                );
                Ok(HandlePaymentWebhookResult::UnlockRecorded {
                    user_id: user_id.to_string(),
                    article_id: article_id.to_string(),
                })
            }
            Ok(InsertOutcome::AlreadyUnlocked) => {
                tracing::info!(
                    event_id = %event.id,
                    user_id = %user_id,
                    article_id = %article_id,
                    "Unlock already recorded; redelivered event no-oped"
                );
                Ok(HandlePaymentWebhookResult::AlreadyUnlocked {
                    user_id: user_id.to_string(),
                    article_id: article_id.to_string(),
                })
            }
            Err(e) => {
                // Swallowed on purpose: a non-2xx here would put the
                // provider into an indefinite retry loop. The unlock is
                // lost until someone acts on this log line.
                tracing::error!(
                    event_id = %event.id,
                    user_id = %user_id,
                    article_id = %article_id,
                    error = %e,
                    "Failed to record unlock; acknowledging anyway"
                );
                Ok(HandlePaymentWebhookResult::Acknowledged)
            }
        }
    }
}
