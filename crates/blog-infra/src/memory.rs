//! In-memory repositories - used when no database is configured.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Post, PostStatus, User, sort_by_default_ordering};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository, UserRepository};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    posts: HashMap<Uuid, Post>,
}

impl State {
    fn posts_where(&self, keep: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.values().filter(|p| keep(p)).cloned().collect();
        sort_by_default_ordering(&mut posts);
        posts
    }
}

/// Shared in-memory storage for users and posts.
///
/// Both repositories handed out by one store see the same data, so deleting a
/// user through [`InMemoryUserRepository`] removes their posts as well.
/// Note: Data is lost on process restart.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        InMemoryPostRepository {
            state: self.state.clone(),
        }
    }

    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            state: self.state.clone(),
        }
    }
}

/// In-memory post repository.
#[derive(Clone)]
pub struct InMemoryPostRepository {
    state: Arc<RwLock<State>>,
}

/// In-memory user repository.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<State>>,
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.state.read().await.posts.get(&id).cloned())
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        post.validate()?;

        let mut state = self.state.write().await;

        if !state.users.contains_key(&post.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                post.author_id
            )));
        }

        let now = Utc::now();
        match state.posts.get(&post.id) {
            Some(stored) => post.stamp_update(stored, now),
            None => post.stamp_insert(now),
        }

        state.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.state.write().await.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.state.read().await.posts_where(|_| true))
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .state
            .read()
            .await
            .posts_where(|p| p.author_id == author_id))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Vec<Post>, RepoError> {
        Ok(self.state.read().await.posts_where(|p| p.slug == slug))
    }

    async fn find_by_status(&self, status: PostStatus) -> Result<Vec<Post>, RepoError> {
        Ok(self.state.read().await.posts_where(|p| p.status == status))
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .posts
            .values()
            .filter(|p| p.author_id == author_id)
            .count() as u64)
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn save(&self, mut user: User) -> Result<User, RepoError> {
        let mut state = self.state.write().await;

        let taken = state
            .users
            .values()
            .any(|u| u.id != user.id && u.username == user.username);
        if taken {
            return Err(RepoError::Constraint(format!(
                "username '{}' is already taken",
                user.username
            )));
        }

        let now = Utc::now();
        match state.users.get(&user.id) {
            Some(stored) => user.stamp_update(stored, now),
            None => user.stamp_insert(now),
        }

        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut state = self.state.write().await;

        if state.users.remove(&id).is_none() {
            return Err(RepoError::NotFound);
        }

        let before = state.posts.len();
        state.posts.retain(|_, p| p.author_id != id);
        tracing::debug!(user_id = %id, posts = before - state.posts.len(), "User deleted with their posts");

        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}
