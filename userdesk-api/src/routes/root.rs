/// Greeting and health check endpoints
///
/// # Endpoints
///
/// - `GET /` - Greeting, after a database connectivity check
/// - `GET /health` - Service and pool status

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;
use std::time::Duration;
use userdesk_shared::db::pool::{self, PoolStats};

/// Upper bound on the connectivity check, independent of the pool's
/// acquire timeout
pub const CONNECTIVITY_TIMEOUT: Duration = Duration::from_secs(2);

/// Greeting response
#[derive(Debug, Serialize, Deserialize)]
pub struct HelloResponse {
    pub message: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy` or `degraded`
    pub status: String,

    /// Application version
    pub version: String,

    /// `connected` or `disconnected`
    pub database: String,

    /// Pool usage at the time of the check
    pub pool: PoolStats,
}

/// Greeting handler
///
/// Checks the database first; a failed or timed out check is logged and the
/// greeting is still returned.
///
/// ```text
/// GET /
///
/// 200 { "message": "Hello World from Bun" }
/// ```
pub async fn hello(State(state): State<AppState>) -> Json<HelloResponse> {
    database_reachable(&state.db).await;

    Json(HelloResponse {
        message: "Hello World from Bun".to_string(),
    })
}

/// Health check handler
///
/// ```text
/// GET /health
///
/// 200 {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "pool": { "active_connections": 0, "idle_connections": 1, "total_connections": 1 }
/// }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = database_reachable(&state.db).await;

    Json(HealthResponse {
        status: (if connected { "healthy" } else { "degraded" }).to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: (if connected { "connected" } else { "disconnected" }).to_string(),
        pool: pool::get_pool_stats(&state.db),
    })
}

/// Runs `SELECT 1`, giving up after [`CONNECTIVITY_TIMEOUT`]
async fn database_reachable(db: &MySqlPool) -> bool {
    match tokio::time::timeout(CONNECTIVITY_TIMEOUT, pool::health_check(db)).await {
        Ok(Ok(())) => true,
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "Database connectivity check failed");
            false
        }
        Err(_) => {
            tracing::warn!(
                timeout_ms = CONNECTIVITY_TIMEOUT.as_millis() as u64,
                "Database connectivity check timed out"
            );
            false
        }
    }
}
