//! SeaORM repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Select, TransactionTrait,
};
use uuid::Uuid;

use blog_core::domain::{Post, PostStatus, User};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::map_db_err;
use super::sea_base::SeaRepository;

/// SeaORM user repository.
pub type SeaUserRepository = SeaRepository<UserEntity>;

/// SeaORM post repository.
pub type SeaPostRepository = SeaRepository<PostEntity>;

/// Apply the default post ordering: newest `publish` first.
fn ordered(select: Select<PostEntity>) -> Select<PostEntity> {
    select
        .order_by_desc(post::Column::Publish)
        .order_by_desc(post::Column::Created)
}

async fn author_exists<C>(db: &C, author_id: Uuid) -> Result<bool, RepoError>
where
    C: ConnectionTrait,
{
    let author = UserEntity::find_by_id(author_id)
        .one(db)
        .await
        .map_err(map_db_err)?;

    Ok(author.is_some())
}

#[async_trait]
impl BaseRepository<Post, Uuid> for SeaPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.find_model(id).await?.map(Into::into))
    }

    async fn save(&self, mut post: Post) -> Result<Post, RepoError> {
        post.validate()?;

        let txn = self.db.begin().await.map_err(map_db_err)?;

        if !author_exists(&txn, post.author_id).await? {
            tracing::warn!(post_id = %post.id, author_id = %post.author_id, "Rejecting post without author");
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                post.author_id
            )));
        }

        let stored = PostEntity::find_by_id(post.id)
            .one(&txn)
            .await
            .map_err(map_db_err)?;

        let now = Utc::now();
        let model = match stored {
            Some(stored) => {
                let stored: Post = stored.into();
                post.stamp_update(&stored, now);
                let mut active: post::ActiveModel = post.into();
                // Never written after insertion.
                active.created = ActiveValue::NotSet;
                active.update(&txn).await
            }
            None => {
                post.stamp_insert(now);
                let active: post::ActiveModel = post.into();
                active.insert(&txn).await
            }
        }
        .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;

        tracing::debug!(post_id = %model.id, status = ?model.status, "Post saved");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.delete_model(id).await?;
        tracing::debug!(post_id = %id, "Post deleted");
        Ok(())
    }
}

#[async_trait]
impl PostRepository for SeaPostRepository {
    async fn list(&self) -> Result<Vec<Post>, RepoError> {
        let result = ordered(PostEntity::find())
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        let result = ordered(PostEntity::find().filter(post::Column::AuthorId.eq(author_id)))
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Vec<Post>, RepoError> {
        let result = ordered(PostEntity::find().filter(post::Column::Slug.eq(slug)))
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_by_status(&self, status: PostStatus) -> Result<Vec<Post>, RepoError> {
        let status: post::Status = status.into();
        let result = ordered(PostEntity::find().filter(post::Column::Status.eq(status)))
            .all(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count_by_author(&self, author_id: Uuid) -> Result<u64, RepoError> {
        PostEntity::find()
            .filter(post::Column::AuthorId.eq(author_id))
            .count(self.db.as_ref())
            .await
            .map_err(map_db_err)
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for SeaUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.find_model(id).await?.map(Into::into))
    }

    async fn save(&self, mut user: User) -> Result<User, RepoError> {
        let stored = self.find_model(user.id).await?;

        let now = Utc::now();
        let model = match stored {
            Some(stored) => {
                let stored: User = stored.into();
                user.stamp_update(&stored, now);
                let mut active: user::ActiveModel = user.into();
                active.created_at = ActiveValue::NotSet;
                active.update(self.db.as_ref()).await
            }
            None => {
                user.stamp_insert(now);
                let active: user::ActiveModel = user.into();
                active.insert(self.db.as_ref()).await
            }
        }
        .map_err(map_db_err)?;

        Ok(model.into())
    }

    /// Deletes the user's posts and the user in one transaction.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let posts = PostEntity::delete_many()
            .filter(post::Column::AuthorId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = UserEntity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            txn.rollback().await.map_err(map_db_err)?;
            return Err(RepoError::NotFound);
        }

        txn.commit().await.map_err(map_db_err)?;

        tracing::info!(user_id = %id, posts = posts.rows_affected, "User deleted with their posts");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for SeaUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}
