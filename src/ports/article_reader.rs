//! ArticleReader port - read-only access to the article catalogue.

use async_trait::async_trait;

use crate::domain::article::Article;
use crate::domain::foundation::{ArticleId, DomainError};

/// Read-only queries over the article catalogue.
///
/// The catalogue is read-mostly; writes go through `ArticleRepository`.
#[async_trait]
pub trait ArticleReader: Send + Sync {
    /// List all articles, newest first.
    async fn list(&self) -> Result<Vec<Article>, DomainError>;

    /// Find a single article by id.
    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, DomainError>;
}
