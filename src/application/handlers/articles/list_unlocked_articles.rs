//! ListUnlockedArticlesHandler - Query handler for a user's unlocks.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::unlock::{UnlockError, UnlockRecord};
use crate::ports::UnlockRepository;

/// Query for the unlock records of one user.
#[derive(Debug, Clone)]
pub struct ListUnlockedArticlesQuery {
    pub user_id: UserId,
}

/// Handler for listing a user's unlocked articles.
///
/// The client gates premium content rendering on this list.
pub struct ListUnlockedArticlesHandler {
    repository: Arc<dyn UnlockRepository>,
}

impl ListUnlockedArticlesHandler {
    pub fn new(repository: Arc<dyn UnlockRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListUnlockedArticlesQuery,
    ) -> Result<Vec<UnlockRecord>, UnlockError> {
        self.repository
            .list_for_user(&query.user_id)
            .await
            .map_err(|e| UnlockError::infrastructure(e.to_string()))
    }
}
