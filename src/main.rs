//! Paywall backend entry point.
//!
//! Composition root: loads configuration, connects collaborators, wires
//! adapters into handler state, and serves the HTTP API.

use std::sync::Arc;
use std::time::Duration;

use axum::{http::HeaderValue, middleware, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use paywall::adapters::auth::{JwtConfig, JwtSessionValidator};
use paywall::adapters::http::middleware::auth_middleware;
use paywall::adapters::http::{
    articles_router, payments_router, ArticlesAppState, PaymentsAppState,
};
use paywall::adapters::postgres::{
    PostgresArticleReader, PostgresArticleRepository, PostgresUnlockRepository,
};
use paywall::adapters::stripe::{StripeConfig, StripePaymentAdapter};
use paywall::config::AppConfig;
use paywall::ports::SessionValidator;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        stripe_test_mode = config.payment.is_test_mode(),
        "Starting paywall backend"
    );

    // Persistence collaborator
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Payment collaborator
    let stripe_config = StripeConfig::new(
        config.payment.stripe_api_key.clone(),
        config.payment.stripe_webhook_secret.clone(),
    )
    .with_currency(config.payment.currency.clone())
    .with_require_livemode(config.is_production());
    let payment_provider = Arc::new(StripePaymentAdapter::new(stripe_config));

    // Identity collaborator
    let session_validator: Arc<dyn SessionValidator> = Arc::new(JwtSessionValidator::new(
        JwtConfig::new(
            config.auth.jwt_secret.clone(),
            config.auth.jwt_audience.clone(),
        ),
    ));

    // Handler state
    let payments_state = PaymentsAppState {
        payment_provider,
        unlock_repository: Arc::new(PostgresUnlockRepository::new(pool.clone())),
    };
    let articles_state = ArticlesAppState {
        article_reader: Arc::new(PostgresArticleReader::new(pool.clone())),
        article_repository: Arc::new(PostgresArticleRepository::new(pool.clone())),
        unlock_repository: Arc::new(PostgresUnlockRepository::new(pool)),
    };

    // The payment routes stay outside the auth layer: session creation
    // passes the user id through uninterpreted and the webhook is
    // authenticated by its signature alone.
    let api = payments_router().with_state(payments_state).merge(
        articles_router()
            .with_state(articles_state)
            .layer(middleware::from_fn_with_state(
                session_validator,
                auth_middleware,
            )),
    );

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the CORS layer from configured origins.
///
/// With no origins configured (development), any origin is allowed.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
