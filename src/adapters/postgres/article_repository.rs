//! PostgreSQL implementation of ArticleRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::article::Article;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ArticleRepository;

/// PostgreSQL implementation of the ArticleRepository port.
pub struct PostgresArticleRepository {
    pool: PgPool,
}

impl PostgresArticleRepository {
    /// Creates a new PostgresArticleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PostgresArticleRepository {
    async fn insert(&self, article: &Article) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO articles (id, title, content, is_premium, price, author_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(article.id.as_uuid())
        .bind(&article.title)
        .bind(&article.content)
        .bind(article.is_premium)
        .bind(article.price.map(|p| p.amount()))
        .bind(article.author_id.as_str())
        .bind(article.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert article: {}", e),
            )
        })?;

        Ok(())
    }
}
