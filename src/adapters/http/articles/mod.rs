//! HTTP adapter for article catalogue endpoints.
//!
//! Exposes the catalogue and unlock queries via REST API:
//! - `GET /api/articles` - List all articles, newest first
//! - `GET /api/articles/:id` - Get a single article
//! - `POST /api/articles` - Publish an article (authenticated)
//! - `GET /api/unlocks` - List the current user's unlocks (authenticated)

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ArticleResponse, CreateArticleRequest, UnlockResponse};
pub use handlers::{
    create_article, get_article, list_articles, list_unlocks, ArticlesAppState,
};
pub use routes::articles_router;
