//! Common test utilities for integration tests
//!
//! Two kinds of context are provided:
//! - [`TestContext::unreachable`]: a lazy pool pointed at a closed port, for
//!   tests of the HTTP contract that must not need a database
//! - [`TestContext::live`]: a pool built from `DB_*` environment variables,
//!   with the `users` table created if missing
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use sqlx::MySqlPool;
use tower::ServiceExt;
use userdesk_api::app::{build_router, AppState};
use userdesk_api::config::{ApiConfig, Config};
use userdesk_shared::db::pool::{create_pool, DatabaseConfig};

/// Test context holding the pool and the router built on top of it
pub struct TestContext {
    pub db: MySqlPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Context whose database can never be reached
    ///
    /// Acquires fail after a short timeout, so database-backed requests
    /// answer 500 quickly.
    pub fn unreachable() -> Self {
        Self::unreachable_with_acquire_timeout(300)
    }

    /// Unreachable context with a caller-chosen acquire timeout
    pub fn unreachable_with_acquire_timeout(acquire_timeout_ms: u64) -> Self {
        let config = Config {
            api: ApiConfig::default(),
            database: DatabaseConfig {
                host: "127.0.0.1".to_string(),
                port: 1,
                max_connections: 2,
                acquire_timeout_ms,
                ..Default::default()
            },
        };

        Self::with_config(config)
    }

    /// Context backed by the MySQL instance described by `DB_*` variables
    pub async fn live() -> anyhow::Result<Self> {
        let config = Config::from_env()?;
        let ctx = Self::with_config(config);

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id  BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
                username VARCHAR(255)    NOT NULL,
                email    VARCHAR(255)    NOT NULL
            )
            "#,
        )
        .execute(&ctx.db)
        .await?;

        Ok(ctx)
    }

    fn with_config(config: Config) -> Self {
        let db = create_pool(&config.database);
        let app = build_router(AppState::new(db.clone(), config));
        Self { db, app }
    }

    /// Sends a request through the router
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.app.clone().oneshot(request).await.unwrap()
    }

    /// Sends a GET and returns status and JSON body
    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        split(self.send(request).await).await
    }

    /// Sends a JSON POST and returns status and JSON body
    pub async fn post_json(
        &self,
        uri: &str,
        body: serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        split(self.send(request).await).await
    }

    /// Number of rows currently in `users`
    pub async fn user_count(&self) -> i64 {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.db)
            .await
            .unwrap();
        row.0
    }
}

/// Splits a response into status and parsed JSON body
pub async fn split(response: Response<Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        panic!(
            "expected JSON body for {}, got {:?}",
            status,
            String::from_utf8_lossy(&bytes)
        )
    });
    (status, body)
}

/// A username that will not collide with other test runs
pub fn unique_username(prefix: &str) -> String {
    format!("{}-{}", prefix, uuid::Uuid::new_v4().simple())
}
