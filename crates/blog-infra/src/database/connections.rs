use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DbConn};

use blog_core::error::RepoError;

use super::map_db_err;

/// Configuration for the blog database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    /// Log every SQL statement.
    pub sql_logging: bool,
}

impl DatabaseConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    pub const DEFAULT_MIN_CONNECTIONS: u32 = 1;

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            min_connections: Self::DEFAULT_MIN_CONNECTIONS,
            sql_logging: false,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Returns `None` when `DATABASE_URL` is not set.
    pub fn from_env() -> Option<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, reading the same keys as [`Self::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let url = lookup("DATABASE_URL")?;

        Some(Self {
            url,
            max_connections: lookup("DB_MAX_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(Self::DEFAULT_MAX_CONNECTIONS),
            min_connections: lookup("DB_MIN_CONNECTIONS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(Self::DEFAULT_MIN_CONNECTIONS),
            sql_logging: lookup("DB_SQL_LOGGING")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
        })
    }

    /// Open a connection pool.
    pub async fn connect(&self) -> Result<DbConn, RepoError> {
        tracing::info!("Initializing database connection...");

        let opts = ConnectOptions::new(&self.url)
            .max_connections(self.max_connections)
            .min_connections(self.min_connections.min(self.max_connections))
            .connect_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .sqlx_logging(self.sql_logging)
            .to_owned();

        let conn = Database::connect(opts).await.map_err(map_db_err)?;
        tracing::info!(pool = self.max_connections, "Database connected");

        Ok(conn)
    }
}
