/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 3000)
/// - `DB_HOST`: Database host (default: localhost)
/// - `DB_PORT`: Database port (default: 3306)
/// - `DB_USER`: Database user (default: root)
/// - `DB_PASSWORD`: Database password (default: empty)
/// - `DB_NAME`: Database name (default: userdesk)
/// - `DB_CONNECTION_LIMIT`: Maximum pool size (default: 10)
/// - `DB_ACQUIRE_TIMEOUT_MS`: Pool acquire timeout in ms (default: 60000)
/// - `DB_IDLE_TIMEOUT_MS`: Idle connection timeout in ms (default: 60000)
/// - `RUST_LOG`: Log filter (default: userdesk_api=debug,tower_http=debug)
///
/// # Example
///
/// ```no_run
/// use userdesk_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{env, str::FromStr};
use userdesk_shared::db::pool::DatabaseConfig;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database and pool configuration
    pub database: DatabaseConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable if a numeric value does not parse
    /// or `DB_CONNECTION_LIMIT` is zero.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup
    ///
    /// Unset variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_defaults = ApiConfig::default();
        let db_defaults = DatabaseConfig::default();

        let max_connections = parse_or(
            &lookup,
            "DB_CONNECTION_LIMIT",
            db_defaults.max_connections,
        )?;
        anyhow::ensure!(
            max_connections > 0,
            "DB_CONNECTION_LIMIT must be at least 1"
        );

        Ok(Self {
            api: ApiConfig {
                host: lookup("API_HOST").unwrap_or(api_defaults.host),
                port: parse_or(&lookup, "API_PORT", api_defaults.port)?,
            },
            database: DatabaseConfig {
                host: lookup("DB_HOST").unwrap_or(db_defaults.host),
                port: parse_or(&lookup, "DB_PORT", db_defaults.port)?,
                user: lookup("DB_USER").unwrap_or(db_defaults.user),
                password: lookup("DB_PASSWORD").unwrap_or(db_defaults.password),
                database: lookup("DB_NAME").unwrap_or(db_defaults.database),
                max_connections,
                acquire_timeout_ms: parse_or(
                    &lookup,
                    "DB_ACQUIRE_TIMEOUT_MS",
                    db_defaults.acquire_timeout_ms,
                )?,
                idle_timeout_ms: parse_or(
                    &lookup,
                    "DB_IDLE_TIMEOUT_MS",
                    db_defaults.idle_timeout_ms,
                )?,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has invalid value {raw:?}")),
        None => Ok(default),
    }
}
