/// Database layer for userdesk
///
/// # Modules
///
/// - `pool`: MySQL connection pool creation, health checks, stats and shutdown
/// - Models are in the `models` module at crate root level
///
/// # Example
///
/// ```no_run
/// use userdesk_shared::db::pool::{create_pool, health_check, DatabaseConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(&DatabaseConfig::default());
///     health_check(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod pool;
