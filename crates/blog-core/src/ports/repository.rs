use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, PostStatus, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update) and return what was stored.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository.
///
/// Deleting a user also deletes every post they authored, atomically.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
///
/// `save` validates the post, requires its author to exist, sets `created` once on
/// insertion and refreshes `updated` on every write. Lists come back in the default
/// ordering (`publish` descending) unless stated otherwise.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts.
    async fn list(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts written by one author.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;

    /// Posts with the given slug. Slugs are not unique.
    async fn find_by_slug(&self, slug: &str) -> Result<Vec<Post>, RepoError>;

    /// Posts in the given status.
    async fn find_by_status(&self, status: PostStatus) -> Result<Vec<Post>, RepoError>;

    /// Number of posts written by one author.
    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError>;
}
