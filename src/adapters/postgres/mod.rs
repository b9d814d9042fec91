//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! This module provides adapters for PostgreSQL-backed persistence:
//! - `PostgresArticleRepository` / `PostgresArticleReader` - Article catalogue
//! - `PostgresUnlockRepository` - Conditional unlock-record inserts and queries

mod article_reader;
mod article_repository;
mod unlock_repository;

pub use article_reader::PostgresArticleReader;
pub use article_repository::PostgresArticleRepository;
pub use unlock_repository::PostgresUnlockRepository;
