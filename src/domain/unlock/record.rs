//! Unlock record entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ArticleId, Timestamp, UserId};

/// Durable fact that a user has unlocked a premium article.
///
/// At most one record exists per `(user_id, article_id)` pair; the
/// persistence layer enforces this with a composite unique constraint and
/// the repository insert no-ops on conflict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockRecord {
    /// The user who paid for access.
    pub user_id: UserId,

    /// The article that was unlocked.
    pub article_id: ArticleId,

    /// When the unlock was recorded.
    pub created_at: Timestamp,
}

impl UnlockRecord {
    /// Creates a new unlock record stamped with the current time.
    pub fn new(user_id: UserId, article_id: ArticleId) -> Self {
        Self {
            user_id,
            article_id,
            created_at: Timestamp::now(),
        }
    }
}
