//! ListArticlesHandler - Query handler for the article catalogue.

use std::sync::Arc;

use crate::domain::article::{Article, ArticleError};
use crate::ports::ArticleReader;

/// Query for the full catalogue, newest first.
#[derive(Debug, Clone, Default)]
pub struct ListArticlesQuery {}

/// Handler for listing articles.
pub struct ListArticlesHandler {
    reader: Arc<dyn ArticleReader>,
}

impl ListArticlesHandler {
    pub fn new(reader: Arc<dyn ArticleReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(&self, _query: ListArticlesQuery) -> Result<Vec<Article>, ArticleError> {
        self.reader
            .list()
            .await
            .map_err(|e| ArticleError::infrastructure(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ArticleId, DomainError, ErrorCode, UserId};
    use async_trait::async_trait;

    struct MockArticleReader {
        articles: Vec<Article>,
        fail_read: bool,
    }

    #[async_trait]
    impl ArticleReader for MockArticleReader {
        async fn list(&self) -> Result<Vec<Article>, DomainError> {
            if self.fail_read {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated read failure",
                ));
            }
            Ok(self.articles.clone())
        }

        async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, DomainError> {
            Ok(self.articles.iter().find(|a| &a.id == id).cloned())
        }
    }

    fn article(title: &str) -> Article {
        Article::new_free(title, "Body", UserId::new("author-1").unwrap()).unwrap()
    }

    #[tokio::test]
    async fn returns_all_articles() {
        let handler = ListArticlesHandler::new(Arc::new(MockArticleReader {
            articles: vec![article("One"), article("Two")],
            fail_read: false,
        }));

        let articles = handler.handle(ListArticlesQuery::default()).await.unwrap();
        assert_eq!(articles.len(), 2);
    }

    #[tokio::test]
    async fn read_failure_maps_to_infrastructure_error() {
        let handler = ListArticlesHandler::new(Arc::new(MockArticleReader {
            articles: vec![],
            fail_read: true,
        }));

        let result = handler.handle(ListArticlesQuery::default()).await;
        assert!(matches!(result, Err(ArticleError::Infrastructure(_))));
    }
}
