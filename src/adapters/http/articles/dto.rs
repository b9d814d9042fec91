//! HTTP DTOs (Data Transfer Objects) for article endpoints.
//!
//! These types define the JSON request/response structure for the article
//! API. They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::domain::article::Article;
use crate::domain::unlock::UnlockRecord;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to publish a new article.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    /// Article title.
    pub title: String,
    /// Full article body.
    pub content: String,
    /// Whether the article sits behind the paywall.
    #[serde(default)]
    pub is_premium: bool,
    /// Unlock price in major currency units; required when premium.
    #[serde(default)]
    pub price: Option<f64>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Article view for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    /// Article ID.
    pub id: String,
    /// Article title.
    pub title: String,
    /// Full article body.
    pub content: String,
    /// Whether the article sits behind the paywall.
    pub is_premium: bool,
    /// Unlock price in major currency units, if premium.
    pub price: Option<f64>,
    /// Authoring user.
    pub author_id: String,
    /// Publication time (ISO 8601).
    pub created_at: String,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id.to_string(),
            title: article.title,
            content: article.content,
            is_premium: article.is_premium,
            price: article.price.map(|p| p.amount()),
            author_id: article.author_id.to_string(),
            created_at: article.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Unlock record view for API responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnlockResponse {
    /// The unlocked article.
    pub article_id: String,
    /// When the unlock was recorded (ISO 8601).
    pub created_at: String,
}

impl From<UnlockRecord> for UnlockResponse {
    fn from(record: UnlockRecord) -> Self {
        Self {
            article_id: record.article_id.to_string(),
            created_at: record.created_at.as_datetime().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::Price;
    use crate::domain::foundation::{ArticleId, UserId};
    use serde_json::json;

    #[test]
    fn create_request_defaults_to_free() {
        let body = json!({"title": "T", "content": "C"});
        let request: CreateArticleRequest = serde_json::from_value(body).unwrap();

        assert!(!request.is_premium);
        assert!(request.price.is_none());
    }

    #[test]
    fn article_response_uses_camel_case() {
        let article = Article::new_premium(
            "T",
            "C",
            UserId::new("author-1").unwrap(),
            Price::new(2.5).unwrap(),
        )
        .unwrap();

        let json = serde_json::to_value(ArticleResponse::from(article)).unwrap();

        assert!(json.get("isPremium").unwrap().as_bool().unwrap());
        assert_eq!(json.get("authorId").unwrap(), "author-1");
        assert_eq!(json.get("price").unwrap().as_f64().unwrap(), 2.5);
    }

    #[test]
    fn unlock_response_carries_article_id() {
        let record = UnlockRecord::new(UserId::new("user-1").unwrap(), ArticleId::new());
        let response = UnlockResponse::from(record.clone());

        assert_eq!(response.article_id, record.article_id.to_string());
    }
}
