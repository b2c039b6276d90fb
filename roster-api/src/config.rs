/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct. A `.env` file is read first when present.
///
/// # Environment Variables
///
/// - `ROSTER_DATABASE_URL`: SQLite URL (default: sqlite://roster.db)
/// - `ROSTER_DATABASE_MAX_CONNECTIONS`: Pool size (default: 5)
/// - `ROSTER_RESET_ON_SCHEMA_MISMATCH`: Drop and recreate an outdated store
///   on startup, destroying its records (default: false)
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `CORS_ORIGINS`: Comma-separated allowed origins, `*` for any (default: *)
/// - `POSTS_BASE_URL`: Remote post collection (default: https://jsonplaceholder.typicode.com)
/// - `POSTS_TIMEOUT_SECONDS`: Remote request timeout (default: 10)
/// - `RUST_LOG`: Log filter
///
/// # Example
///
/// ```no_run
/// use roster_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use anyhow::Context;
use roster_shared::db::pool::DatabaseConfig as PoolConfig;
use roster_shared::remote::PostsConfig;
use serde::{Deserialize, Serialize};
use std::env;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Remote post collection
    pub posts: RemoteConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` allows any)
    pub cors_origins: Vec<String>,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,

    /// Whether startup may wipe a store with an outdated schema
    pub reset_on_schema_mismatch: bool,
}

/// Remote post collection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Base URL of the collection
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl DatabaseConfig {
    /// Pool settings for this database
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            url: self.url.clone(),
            max_connections: self.max_connections,
            ..PoolConfig::default()
        }
    }
}

impl RemoteConfig {
    /// Client settings for the remote collection
    pub fn client_config(&self) -> PostsConfig {
        PostsConfig {
            base_url: self.base_url.clone(),
            timeout_seconds: self.timeout_seconds,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that does not parse.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup
    ///
    /// Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let api_host = var("API_HOST", "0.0.0.0");
        let api_port = var("API_PORT", "8080")
            .parse::<u16>()
            .context("API_PORT must be a port number")?;

        let cors_origins = var("CORS_ORIGINS", "*")
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let database_url = var("ROSTER_DATABASE_URL", "sqlite://roster.db");
        let max_connections = var("ROSTER_DATABASE_MAX_CONNECTIONS", "5")
            .parse::<u32>()
            .context("ROSTER_DATABASE_MAX_CONNECTIONS must be a positive integer")?;
        if max_connections == 0 {
            anyhow::bail!("ROSTER_DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let reset_on_schema_mismatch = var("ROSTER_RESET_ON_SCHEMA_MISMATCH", "false")
            .parse::<bool>()
            .context("ROSTER_RESET_ON_SCHEMA_MISMATCH must be true or false")?;

        let posts_base_url = var("POSTS_BASE_URL", roster_shared::remote::client::DEFAULT_BASE_URL);
        let posts_timeout = var("POSTS_TIMEOUT_SECONDS", "10")
            .parse::<u64>()
            .context("POSTS_TIMEOUT_SECONDS must be a whole number of seconds")?;

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                reset_on_schema_mismatch,
            },
            posts: RemoteConfig {
                base_url: posts_base_url,
                timeout_seconds: posts_timeout,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
