//! GetArticleHandler - Query handler for a single article.

use std::sync::Arc;

use crate::domain::article::{Article, ArticleError};
use crate::domain::foundation::ArticleId;
use crate::ports::ArticleReader;

/// Query for one article by id.
#[derive(Debug, Clone)]
pub struct GetArticleQuery {
    pub article_id: ArticleId,
}

/// Handler for retrieving a single article.
pub struct GetArticleHandler {
    reader: Arc<dyn ArticleReader>,
}

impl GetArticleHandler {
    pub fn new(reader: Arc<dyn ArticleReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, query: GetArticleQuery) -> Result<Article, ArticleError> {
        self.reader
            .find_by_id(&query.article_id)
            .await
            .map_err(|e| ArticleError::infrastructure(e.to_string()))?
            .ok_or_else(|| ArticleError::not_found(query.article_id))
    }
}
