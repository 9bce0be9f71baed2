//! Repository wiring - picks the database or the in-memory store.

use std::sync::Arc;

use sea_orm::DbConn;

use blog_core::error::RepoError;
use blog_core::ports::{PostRepository, UserRepository};

use crate::database::{DatabaseConfig, SeaPostRepository, SeaUserRepository};
use crate::memory::InMemoryStore;

/// The repositories the blog needs, behind their ports.
#[derive(Clone)]
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    /// Repositories backed by an already migrated database.
    pub fn from_connection(db: DbConn) -> Self {
        let db = Arc::new(db);
        Self {
            posts: Arc::new(SeaPostRepository::new(db.clone())),
            users: Arc::new(SeaUserRepository::new(db)),
        }
    }

    /// Repositories sharing one fresh in-memory store.
    pub fn in_memory() -> Self {
        let store = InMemoryStore::new();
        Self {
            posts: Arc::new(store.posts()),
            users: Arc::new(store.users()),
        }
    }

    /// Build repositories from configuration.
    ///
    /// Without a database configured the in-memory store is used. A configured
    /// database that cannot be reached is an error, never a silent fallback.
    pub async fn init(config: Option<&DatabaseConfig>) -> Result<Self, RepoError> {
        let Some(config) = config else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory());
        };

        let db = config.connect().await.inspect_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
        })?;

        Ok(Self::from_connection(db))
    }
}
