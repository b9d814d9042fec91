//! PostgreSQL implementation of ArticleReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::article::{Article, Price};
use crate::domain::foundation::{ArticleId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ArticleReader;

/// PostgreSQL implementation of the ArticleReader port.
pub struct PostgresArticleReader {
    pool: PgPool,
}

impl PostgresArticleReader {
    /// Creates a new PostgresArticleReader with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an article.
#[derive(Debug, sqlx::FromRow)]
struct ArticleRow {
    id: Uuid,
    title: String,
    content: String,
    is_premium: bool,
    price: Option<f64>,
    author_id: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = DomainError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let price = match row.price {
            Some(amount) => Some(Price::new(amount).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid price: {}", e))
            })?),
            None => None,
        };

        Ok(Article {
            id: ArticleId::from_uuid(row.id),
            title: row.title,
            content: row.content,
            is_premium: row.is_premium,
            price,
            author_id: UserId::new(row.author_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid author_id: {}", e))
            })?,
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

const SELECT_COLUMNS: &str = "id, title, content, is_premium, price, author_id, created_at";

#[async_trait]
impl ArticleReader for PostgresArticleReader {
    async fn list(&self) -> Result<Vec<Article>, DomainError> {
        let rows: Vec<ArticleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM articles ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list articles: {}", e),
            )
        })?;

        rows.into_iter().map(Article::try_from).collect()
    }

    async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, DomainError> {
        let row: Option<ArticleRow> = sqlx::query_as(&format!(
            "SELECT {} FROM articles WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to find article: {}", e),
            )
        })?;

        row.map(Article::try_from).transpose()
    }
}
