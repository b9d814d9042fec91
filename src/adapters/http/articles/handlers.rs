//! HTTP handlers for article endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use uuid::Uuid;

use crate::application::handlers::articles::{
    CreateArticleCommand, CreateArticleHandler, GetArticleHandler, GetArticleQuery,
    ListArticlesHandler, ListArticlesQuery, ListUnlockedArticlesHandler,
    ListUnlockedArticlesQuery,
};
use crate::domain::article::ArticleError;
use crate::domain::foundation::ArticleId;
use crate::domain::unlock::UnlockError;
use crate::ports::{ArticleReader, ArticleRepository, UnlockRepository};

use super::super::middleware::RequireAuth;
use super::super::payments::ErrorResponse;
use super::dto::{ArticleResponse, CreateArticleRequest, UnlockResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing the catalogue dependencies.
#[derive(Clone)]
pub struct ArticlesAppState {
    pub article_reader: Arc<dyn ArticleReader>,
    pub article_repository: Arc<dyn ArticleRepository>,
    pub unlock_repository: Arc<dyn UnlockRepository>,
}

impl ArticlesAppState {
    /// Create handlers on demand from the shared state.
    pub fn list_handler(&self) -> ListArticlesHandler {
        ListArticlesHandler::new(self.article_reader.clone())
    }

    pub fn get_handler(&self) -> GetArticleHandler {
        GetArticleHandler::new(self.article_reader.clone())
    }

    pub fn create_handler(&self) -> CreateArticleHandler {
        CreateArticleHandler::new(self.article_repository.clone())
    }

    pub fn unlocks_handler(&self) -> ListUnlockedArticlesHandler {
        ListUnlockedArticlesHandler::new(self.unlock_repository.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/articles - List all articles, newest first
pub async fn list_articles(
    State(state): State<ArticlesAppState>,
) -> Result<impl IntoResponse, ArticlesApiError> {
    let handler = state.list_handler();
    let articles = handler.handle(ListArticlesQuery::default()).await?;

    let response: Vec<ArticleResponse> =
        articles.into_iter().map(ArticleResponse::from).collect();
    Ok(Json(response))
}

/// GET /api/articles/:id - Get a single article
pub async fn get_article(
    State(state): State<ArticlesAppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ArticlesApiError> {
    let handler = state.get_handler();
    let query = GetArticleQuery {
        article_id: ArticleId::from_uuid(id),
    };

    let article = handler.handle(query).await?;

    Ok(Json(ArticleResponse::from(article)))
}

/// GET /api/unlocks - List the current user's unlocked articles
pub async fn list_unlocks(
    State(state): State<ArticlesAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ArticlesApiError> {
    let handler = state.unlocks_handler();
    let query = ListUnlockedArticlesQuery { user_id: user.id };

    let unlocks = handler.handle(query).await?;

    let response: Vec<UnlockResponse> = unlocks.into_iter().map(UnlockResponse::from).collect();
    Ok(Json(response))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/articles - Publish an article
pub async fn create_article(
    State(state): State<ArticlesAppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<CreateArticleRequest>,
) -> Result<impl IntoResponse, ArticlesApiError> {
    let handler = state.create_handler();
    let cmd = CreateArticleCommand {
        author_id: user.id,
        title: request.title,
        content: request.content,
        is_premium: request.is_premium,
        price: request.price,
    };

    let article = handler.handle(cmd).await?;

    Ok((StatusCode::CREATED, Json(ArticleResponse::from(article))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts catalogue errors to HTTP responses.
pub struct ArticlesApiError(ArticleError);

impl From<ArticleError> for ArticlesApiError {
    fn from(err: ArticleError) -> Self {
        Self(err)
    }
}

impl From<UnlockError> for ArticlesApiError {
    fn from(err: UnlockError) -> Self {
        Self(ArticleError::infrastructure(err.to_string()))
    }
}

impl IntoResponse for ArticlesApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ArticleError::NotFound(_) => StatusCode::NOT_FOUND,
            ArticleError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
            ArticleError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(self.0.message());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::article::Article;
    use crate::domain::foundation::{AuthenticatedUser, DomainError, UserId};
    use crate::domain::unlock::UnlockRecord;
    use crate::ports::InsertOutcome;
    use async_trait::async_trait;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockCatalogue {
        articles: Mutex<Vec<Article>>,
    }

    impl MockCatalogue {
        fn with_articles(articles: Vec<Article>) -> Self {
            Self {
                articles: Mutex::new(articles),
            }
        }
    }

    #[async_trait]
    impl ArticleReader for MockCatalogue {
        async fn list(&self) -> Result<Vec<Article>, DomainError> {
            Ok(self.articles.lock().unwrap().clone())
        }

        async fn find_by_id(&self, id: &ArticleId) -> Result<Option<Article>, DomainError> {
            Ok(self
                .articles
                .lock()
                .unwrap()
                .iter()
                .find(|a| &a.id == id)
                .cloned())
        }
    }

    #[async_trait]
    impl ArticleRepository for MockCatalogue {
        async fn insert(&self, article: &Article) -> Result<(), DomainError> {
            self.articles.lock().unwrap().push(article.clone());
            Ok(())
        }
    }

    struct MockUnlockRepository {
        records: Mutex<Vec<UnlockRecord>>,
    }

    #[async_trait]
    impl UnlockRepository for MockUnlockRepository {
        async fn insert(&self, record: &UnlockRecord) -> Result<InsertOutcome, DomainError> {
            self.records.lock().unwrap().push(record.clone());
            Ok(InsertOutcome::Inserted)
        }

        async fn is_unlocked(
            &self,
            user_id: &UserId,
            article_id: &ArticleId,
        ) -> Result<bool, DomainError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .any(|r| &r.user_id == user_id && &r.article_id == article_id))
        }

        async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<UnlockRecord>, DomainError> {
            Ok(self
                .records
                .lock()
                .unwrap()
                .iter()
                .filter(|r| &r.user_id == user_id)
                .cloned()
                .collect())
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn test_user() -> AuthenticatedUser {
        AuthenticatedUser::new(UserId::new("user-1").unwrap(), "reader@example.com")
    }

    fn sample_article() -> Article {
        Article::new_free("Title", "Body", UserId::new("author-1").unwrap()).unwrap()
    }

    fn test_state(articles: Vec<Article>, unlocks: Vec<UnlockRecord>) -> ArticlesAppState {
        let catalogue = Arc::new(MockCatalogue::with_articles(articles));
        ArticlesAppState {
            article_reader: catalogue.clone(),
            article_repository: catalogue,
            unlock_repository: Arc::new(MockUnlockRepository {
                records: Mutex::new(unlocks),
            }),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Handler Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn list_articles_returns_ok() {
        let state = test_state(vec![sample_article()], vec![]);

        let result = list_articles(State(state)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn get_article_found_returns_ok() {
        let article = sample_article();
        let id = *article.id.as_uuid();
        let state = test_state(vec![article], vec![]);

        let result = get_article(State(state), Path(id)).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn get_article_missing_maps_to_404() {
        let state = test_state(vec![], vec![]);

        let result = get_article(State(state), Path(Uuid::new_v4())).await;

        let response = result.err().unwrap().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn create_article_returns_created() {
        let state = test_state(vec![], vec![]);
        let request = CreateArticleRequest {
            title: "New".to_string(),
            content: "Body".to_string(),
            is_premium: true,
            price: Some(3.0),
        };

        let result =
            create_article(State(state), RequireAuth(test_user()), Json(request)).await;

        let response = result.ok().unwrap().into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn create_premium_without_price_maps_to_400() {
        let state = test_state(vec![], vec![]);
        let request = CreateArticleRequest {
            title: "New".to_string(),
            content: "Body".to_string(),
            is_premium: true,
            price: None,
        };

        let result =
            create_article(State(state), RequireAuth(test_user()), Json(request)).await;

        let response = result.err().unwrap().into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn list_unlocks_returns_only_own_records() {
        let own = UnlockRecord::new(UserId::new("user-1").unwrap(), ArticleId::new());
        let other = UnlockRecord::new(UserId::new("user-2").unwrap(), ArticleId::new());
        let state = test_state(vec![], vec![own, other]);

        let result = list_unlocks(State(state), RequireAuth(test_user())).await;
        assert!(result.is_ok());
    }
}
