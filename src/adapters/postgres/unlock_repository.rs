//! PostgreSQL implementation of UnlockRepository.
//!
//! The insert is conditional: `ON CONFLICT (user_id, article_id) DO NOTHING`
//! against the composite unique constraint, with `rows_affected` deciding
//! whether this delivery won the insert or a prior one did. Concurrent
//! redeliveries of the same completed checkout therefore cannot produce
//! duplicate rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{ArticleId, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::unlock::UnlockRecord;
use crate::ports::{InsertOutcome, UnlockRepository};

/// PostgreSQL implementation of the UnlockRepository port.
pub struct PostgresUnlockRepository {
    pool: PgPool,
}

impl PostgresUnlockRepository {
    /// Creates a new PostgresUnlockRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of an unlock record.
#[derive(Debug, sqlx::FromRow)]
struct UnlockRow {
    user_id: String,
    article_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<UnlockRow> for UnlockRecord {
    type Error = DomainError;

    fn try_from(row: UnlockRow) -> Result<Self, Self::Error> {
        Ok(UnlockRecord {
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            article_id: ArticleId::from_uuid(row.article_id),
            created_at: Timestamp::from_datetime(row.created_at),
        })
    }
}

#[async_trait]
impl UnlockRepository for PostgresUnlockRepository {
    async fn insert(&self, record: &UnlockRecord) -> Result<InsertOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO unlocked_articles (user_id, article_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, article_id) DO NOTHING
            "#,
        )
        .bind(record.user_id.as_str())
        .bind(record.article_id.as_uuid())
        .bind(record.created_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert unlock record: {}", e),
            )
        })?;

        if result.rows_affected() == 0 {
            Ok(InsertOutcome::AlreadyUnlocked)
        } else {
            Ok(InsertOutcome::Inserted)
        }
    }

    async fn is_unlocked(
        &self,
        user_id: &UserId,
        article_id: &ArticleId,
    ) -> Result<bool, DomainError> {
        let row: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT 1::bigint FROM unlocked_articles
            WHERE user_id = $1 AND article_id = $2
            "#,
        )
        .bind(user_id.as_str())
        .bind(article_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to query unlock record: {}", e),
            )
        })?;

        Ok(row.is_some())
    }

    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UnlockRecord>, DomainError> {
        let rows: Vec<UnlockRow> = sqlx::query_as(
            r#"
            SELECT user_id, article_id, created_at
            FROM unlocked_articles
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to list unlock records: {}", e),
            )
        })?;

        rows.into_iter().map(UnlockRecord::try_from).collect()
    }
}
