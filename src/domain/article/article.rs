//! Article entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ArticleId, Timestamp, UserId, ValidationError};

use super::Price;

/// An article in the catalogue.
///
/// Free articles are readable by anyone; premium articles require an
/// unlock record for the reading user. The premium flag and price are
/// set at creation and never change afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Unique article identifier.
    pub id: ArticleId,

    /// Article title.
    pub title: String,

    /// Full article body.
    pub content: String,

    /// Whether the article sits behind the paywall.
    pub is_premium: bool,

    /// Unlock price. `None` for free articles.
    pub price: Option<Price>,

    /// The user who authored the article.
    pub author_id: UserId,

    /// When the article was published.
    pub created_at: Timestamp,
}

impl Article {
    /// Creates a new free article.
    pub fn new_free(
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: UserId,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }

        Ok(Self {
            id: ArticleId::new(),
            title,
            content: content.into(),
            is_premium: false,
            price: None,
            author_id,
            created_at: Timestamp::now(),
        })
    }

    /// Creates a new premium article with an unlock price.
    pub fn new_premium(
        title: impl Into<String>,
        content: impl Into<String>,
        author_id: UserId,
        price: Price,
    ) -> Result<Self, ValidationError> {
        let mut article = Self::new_free(title, content, author_id)?;
        article.is_premium = true;
        article.price = Some(price);
        Ok(article)
    }
}
