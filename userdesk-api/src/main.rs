//! # userdesk API Server
//!
//! Creates and fetches user records over HTTP, backed by a pooled MySQL
//! connection.
//!
//! ## Lifecycle
//!
//! 1. Load configuration from the environment (and `.env`)
//! 2. Create the connection pool and check the database
//! 3. Serve until SIGINT or SIGTERM
//! 4. Finish in-flight requests, drain and close the pool, exit 0
//!
//! ## Usage
//!
//! ```bash
//! DB_HOST=localhost DB_PASSWORD=secret cargo run -p userdesk-api
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use userdesk_api::{
    app::{build_router, AppState},
    config::Config,
};
use userdesk_shared::db::pool::{close_pool, create_pool, health_check};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "userdesk_api=debug,userdesk_shared=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "userdesk API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    let pool = create_pool(&config.database);
    match health_check(&pool).await {
        Ok(()) => tracing::info!("Database reachable"),
        Err(err) => tracing::warn!(error = %err, "Database not reachable yet, continuing"),
    }

    let app = build_router(AppState::new(pool.clone(), config));

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown signal received, draining connections...");
    close_pool(pool).await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
