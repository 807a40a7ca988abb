/// Integration tests for the database connection pool and user model
///
/// Tests marked `#[ignore]` require a running MySQL database.
/// Run with: cargo test --test db_pool_tests -- --ignored --test-threads=1
///
/// Connection settings come from the environment:
/// export DB_HOST=localhost DB_USER=root DB_PASSWORD=secret DB_NAME=userdesk_test

use sqlx::MySqlPool;
use std::env;
use std::time::{Duration, Instant};
use userdesk_shared::db::pool::{
    close_pool, create_pool, get_pool_stats, health_check, DatabaseConfig,
};
use userdesk_shared::models::user::{CreateUser, User};

/// Helper to build the test database config from environment
fn test_config() -> DatabaseConfig {
    let defaults = DatabaseConfig::default();
    DatabaseConfig {
        host: env::var("DB_HOST").unwrap_or(defaults.host),
        port: env::var("DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port),
        user: env::var("DB_USER").unwrap_or(defaults.user),
        password: env::var("DB_PASSWORD").unwrap_or(defaults.password),
        database: env::var("DB_NAME").unwrap_or_else(|_| "userdesk_test".to_string()),
        acquire_timeout_ms: 5_000,
        ..defaults
    }
}

fn unreachable_config() -> DatabaseConfig {
    DatabaseConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        max_connections: 1,
        acquire_timeout_ms: 300,
        ..Default::default()
    }
}

async fn ensure_users_table(pool: &MySqlPool) {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            user_id  BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            username VARCHAR(255)    NOT NULL,
            email    VARCHAR(255)    NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await
    .expect("Failed to create users table");
}

#[tokio::test]
async fn test_acquire_times_out_when_unreachable() {
    let pool = create_pool(&unreachable_config());

    let start = Instant::now();
    let result = pool.acquire().await;

    assert!(result.is_err(), "Acquire should fail when the database is unreachable");
    assert!(start.elapsed() < Duration::from_secs(5));
    assert_eq!(get_pool_stats(&pool).active_connections, 0);

    close_pool(pool).await;
}

#[tokio::test]
async fn test_health_check_fails_when_unreachable() {
    let pool = create_pool(&unreachable_config());

    assert!(health_check(&pool).await.is_err());

    close_pool(pool).await;
}

#[tokio::test]
async fn test_closed_pool_rejects_acquire() {
    let pool = create_pool(&unreachable_config());

    close_pool(pool.clone()).await;

    assert!(pool.is_closed());
    assert!(matches!(pool.acquire().await, Err(sqlx::Error::PoolClosed)));
}

#[tokio::test]
#[ignore = "requires a running MySQL database"]
async fn test_health_check_success() {
    let pool = create_pool(&test_config());

    let result = health_check(&pool).await;
    assert!(result.is_ok(), "Health check should succeed: {:?}", result.err());

    close_pool(pool).await;
}

#[tokio::test]
#[ignore = "requires a running MySQL database"]
async fn test_connection_returned_after_failed_statement() {
    let pool = create_pool(&test_config());
    health_check(&pool).await.expect("Database should be reachable");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let idle_before = get_pool_stats(&pool).idle_connections;

    {
        let mut conn = pool.acquire().await.expect("Failed to acquire connection");
        assert_eq!(get_pool_stats(&pool).active_connections, 1);

        let result = sqlx::query("SELECT * FROM table_that_does_not_exist")
            .execute(&mut *conn)
            .await;
        assert!(result.is_err());
    }

    // release happens on a background task after the guard drops
    tokio::time::sleep(Duration::from_millis(100)).await;

    let stats = get_pool_stats(&pool);
    assert_eq!(stats.active_connections, 0);
    assert_eq!(stats.idle_connections, idle_before);

    close_pool(pool).await;
}

#[tokio::test]
#[ignore = "requires a running MySQL database"]
async fn test_pool_exhaustion_timeout() {
    let config = DatabaseConfig {
        max_connections: 2,
        acquire_timeout_ms: 1_000,
        ..test_config()
    };
    let pool = create_pool(&config);

    let conn1 = pool.acquire().await.expect("Failed to acquire connection 1");
    let conn2 = pool.acquire().await.expect("Failed to acquire connection 2");

    let start = Instant::now();
    let result = pool.acquire().await;
    let elapsed = start.elapsed();

    assert!(matches!(result, Err(sqlx::Error::PoolTimedOut)));
    assert!(elapsed >= Duration::from_millis(900) && elapsed <= Duration::from_secs(3));

    drop(conn1);
    drop(conn2);
    close_pool(pool).await;
}

#[tokio::test]
#[ignore = "requires a running MySQL database"]
async fn test_close_pool_waits_for_checked_out_connections() {
    let pool = create_pool(&test_config());
    let conn = pool.acquire().await.expect("Failed to acquire connection");

    let holder = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        drop(conn);
    });

    let start = Instant::now();
    close_pool(pool.clone()).await;

    assert!(start.elapsed() >= Duration::from_millis(150));
    assert_eq!(pool.size(), 0);
    holder.await.expect("Holder task panicked");
}

#[tokio::test]
#[ignore = "requires a running MySQL database"]
async fn test_user_create_and_find() {
    let pool = create_pool(&test_config());
    ensure_users_table(&pool).await;

    let username = format!("model-{}", uuid::Uuid::new_v4().simple());
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");

    let user_id = User::create(
        &mut conn,
        &CreateUser {
            username: username.clone(),
            email: "model@example.com".to_string(),
        },
    )
    .await
    .expect("Failed to create user");
    assert!(user_id > 0);

    let found = User::find_by_id(&mut conn, user_id)
        .await
        .expect("Failed to query user")
        .expect("User should exist");
    assert_eq!(
        found,
        User {
            user_id,
            username,
            email: "model@example.com".to_string(),
        }
    );

    let missing = User::find_by_id(&mut conn, u64::MAX)
        .await
        .expect("Failed to query user");
    assert!(missing.is_none());

    drop(conn);
    close_pool(pool).await;
}
