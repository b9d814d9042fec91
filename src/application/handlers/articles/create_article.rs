//! CreateArticleHandler - Command handler for publishing articles.

use std::sync::Arc;

use crate::domain::article::{Article, ArticleError, Price};
use crate::domain::foundation::UserId;
use crate::ports::ArticleRepository;

/// Command to publish a new article.
#[derive(Debug, Clone)]
pub struct CreateArticleCommand {
    pub author_id: UserId,
    pub title: String,
    pub content: String,
    pub is_premium: bool,
    /// Unlock price in major currency units; required for premium articles.
    pub price: Option<f64>,
}

/// Handler for publishing articles.
pub struct CreateArticleHandler {
    repository: Arc<dyn ArticleRepository>,
}

impl CreateArticleHandler {
    pub fn new(repository: Arc<dyn ArticleRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: CreateArticleCommand) -> Result<Article, ArticleError> {
        let article = if cmd.is_premium {
            let amount = cmd.price.ok_or_else(|| {
                ArticleError::validation("price", "Premium articles require a price")
            })?;
            let price = Price::new(amount).map_err(|e| {
                ArticleError::validation("price", e.to_string())
            })?;
            Article::new_premium(cmd.title, cmd.content, cmd.author_id, price)
        } else {
            Article::new_free(cmd.title, cmd.content, cmd.author_id)
        }
        .map_err(|e| ArticleError::validation("title", e.to_string()))?;

        self.repository
            .insert(&article)
            .await
            .map_err(|e| ArticleError::infrastructure(e.to_string()))?;

        tracing::info!(
            article_id = %article.id,
            is_premium = article.is_premium,
            "Article published"
        );

        Ok(article)
    }
}
