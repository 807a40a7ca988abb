/// Database connection pool management
///
/// This module owns the MySQL connection pool shared by every request handler.
/// Connections are handed out as [`sqlx::pool::PoolConnection`] guards which
/// return themselves to the pool when dropped, on every exit path.
///
/// # Example
///
/// ```no_run
/// use userdesk_shared::db::pool::{close_pool, create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), sqlx::Error> {
/// let config = DatabaseConfig {
///     host: "db.internal".to_string(),
///     password: "secret".to_string(),
///     ..Default::default()
/// };
///
/// let pool = create_pool(&config);
///
/// {
///     let mut conn = pool.acquire().await?;
///     let row: (i64,) = sqlx::query_as("SELECT ?")
///         .bind(42i64)
///         .fetch_one(&mut *conn)
///         .await?;
///     assert_eq!(row.0, 42);
/// } // connection returned here
///
/// close_pool(pool).await;
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Configuration for the database connection pool
///
/// Timeouts are in milliseconds to match the environment variables they are
/// read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database server host
    pub host: String,

    /// Database server port
    ///
    /// Default: 3306
    pub port: u16,

    /// Login user
    pub user: String,

    /// Login password
    #[serde(skip_serializing)]
    pub password: String,

    /// Schema to connect to
    pub database: String,

    /// Maximum number of concurrently open connections
    ///
    /// Default: 10
    pub max_connections: u32,

    /// How long `acquire` waits for a free connection before failing (ms)
    ///
    /// Default: 60000
    pub acquire_timeout_ms: u64,

    /// How long an unused connection stays open before being closed (ms)
    ///
    /// Default: 60000
    pub idle_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: "userdesk".to_string(),
            max_connections: 10,
            acquire_timeout_ms: 60_000,
            idle_timeout_ms: 60_000,
        }
    }
}

impl DatabaseConfig {
    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }
}

/// Creates the MySQL connection pool
///
/// The pool connects lazily: no connection is opened until the first
/// `acquire`, so the server can start while the database is still coming up.
/// Call [`health_check`] to verify connectivity eagerly.
pub fn create_pool(config: &DatabaseConfig) -> MySqlPool {
    info!(
        host = %config.host,
        port = config.port,
        database = %config.database,
        max_connections = config.max_connections,
        acquire_timeout_ms = config.acquire_timeout_ms,
        idle_timeout_ms = config.idle_timeout_ms,
        "Creating database connection pool"
    );

    let pool = MySqlPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(0)
        .acquire_timeout(Duration::from_millis(config.acquire_timeout_ms))
        .idle_timeout(Duration::from_millis(config.idle_timeout_ms))
        .connect_lazy_with(config.connect_options());

    debug!("Database connection pool created");
    pool
}

/// Performs a health check on the database connection
///
/// Executes `SELECT 1` to verify the database is reachable and responding.
///
/// # Errors
///
/// Returns the driver error if a connection cannot be acquired or the query
/// fails, and a protocol error if the database answers with something else.
pub async fn health_check(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    debug!("Performing database health check");

    let result: (i64,) = sqlx::query_as("SELECT 1").fetch_one(pool).await?;

    if result.0 == 1 {
        debug!("Database health check passed");
        Ok(())
    } else {
        warn!("Database health check returned unexpected value: {}", result.0);
        Err(sqlx::Error::Protocol(
            "Health check returned unexpected value".into(),
        ))
    }
}

/// Snapshot of pool usage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Connections currently checked out by handlers
    pub active_connections: usize,

    /// Open connections waiting in the pool
    pub idle_connections: usize,

    /// All open connections
    pub total_connections: usize,
}

/// Gets current pool statistics for monitoring
pub fn get_pool_stats(pool: &MySqlPool) -> PoolStats {
    let size = pool.size();
    let idle = pool.num_idle() as u32;

    PoolStats {
        active_connections: size.saturating_sub(idle) as usize,
        idle_connections: idle as usize,
        total_connections: size as usize,
    }
}

/// Drains and closes the connection pool
///
/// New acquires fail immediately; this waits for every checked-out connection
/// to be returned, then closes them all.
pub async fn close_pool(pool: MySqlPool) {
    let stats = get_pool_stats(&pool);
    info!(
        active_connections = stats.active_connections,
        "Draining database connection pool"
    );
    pool.close().await;
    info!("Database connection pool closed");
}
