//! Axum router configuration for article endpoints.

use axum::{
    routing::get,
    Router,
};

use super::handlers::{
    create_article, get_article, list_articles, list_unlocks, ArticlesAppState,
};

/// Create the articles API router.
///
/// # Routes
///
/// ## Public Endpoints
/// - `GET /articles` - List all articles, newest first
/// - `GET /articles/:id` - Get a single article
///
/// ## Authenticated Endpoints (require bearer token)
/// - `POST /articles` - Publish an article
/// - `GET /unlocks` - List the current user's unlocked articles
pub fn articles_router() -> Router<ArticlesAppState> {
    Router::new()
        .route("/articles", get(list_articles).post(create_article))
        .route("/articles/:id", get(get_article))
        .route("/unlocks", get(list_unlocks))
}
