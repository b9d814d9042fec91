//! ArticleRepository port - write access to the article catalogue.

use async_trait::async_trait;

use crate::domain::article::Article;
use crate::domain::foundation::DomainError;

/// Persists new articles.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Insert a new article.
    async fn insert(&self, article: &Article) -> Result<(), DomainError>;
}
