/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use userdesk_api::{app::AppState, config::Config};
/// use userdesk_shared::db::pool::create_pool;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = create_pool(&config.database);
/// let state = AppState::new(pool, config);
/// let app = userdesk_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::{config::Config, error, routes};
use axum::{
    routing::{get, post},
    Router,
};
use sqlx::MySqlPool;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// The pool is the only state shared between requests.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: MySqlPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: MySqlPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// ```text
/// /
/// ├── GET  /            # Greeting
/// ├── GET  /health      # Health check
/// ├── POST /users       # Create user
/// └── GET  /users/:id   # Fetch user
/// ```
///
/// Unmatched paths and unsupported methods on known paths answer
/// 404 `{ "error": "Not Found" }`. Handler panics answer
/// 500 `{ "error": "Internal Server Error", "detail": ... }`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root::hello).fallback(routes::not_found))
        .route("/health", get(routes::root::health_check).fallback(routes::not_found))
        .route("/users", post(routes::users::create_user).fallback(routes::not_found))
        .route("/users/:id", get(routes::users::get_user).fallback(routes::not_found))
        .fallback(routes::not_found)
        .layer(CatchPanicLayer::custom(error::panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}
