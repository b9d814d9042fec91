//! UnlockRepository port - Interface for durable unlock records.
//!
//! The payment provider delivers completed-checkout events at least once,
//! so the reconciliation handler may attempt the same insert more than
//! once. The insert is therefore *conditional*: implementations must key
//! on `(user_id, article_id)` and no-op on conflict, reporting which of
//! the two happened. Idempotency lives here, not in the handler.

use async_trait::async_trait;

use crate::domain::foundation::{ArticleId, DomainError, UserId};
use crate::domain::unlock::UnlockRecord;

/// Result of attempting to insert an unlock record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Record was inserted (first unlock for this pair).
    Inserted,
    /// A record for this `(user_id, article_id)` pair already exists.
    AlreadyUnlocked,
}

/// Port for storing and querying unlock records.
///
/// Implementations should use a database constraint
/// (`UNIQUE (user_id, article_id)`) plus `ON CONFLICT DO NOTHING`
/// semantics so concurrent redeliveries cannot produce duplicates.
#[async_trait]
pub trait UnlockRepository: Send + Sync {
    /// Attempt to insert an unlock record.
    ///
    /// Returns `InsertOutcome::Inserted` on first insert, or
    /// `InsertOutcome::AlreadyUnlocked` if the pair is already recorded.
    async fn insert(&self, record: &UnlockRecord) -> Result<InsertOutcome, DomainError>;

    /// Check whether a user has unlocked an article.
    async fn is_unlocked(
        &self,
        user_id: &UserId,
        article_id: &ArticleId,
    ) -> Result<bool, DomainError>;

    /// List all unlock records for a user, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UnlockRecord>, DomainError>;
}
