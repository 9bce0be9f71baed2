use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::{DbConn, EntityTrait, PrimaryKeyTrait};

use blog_core::error::RepoError;

use super::map_db_err;

/// Generic SeaORM repository over one entity.
///
/// Holds the connection and the lookups every entity shares; the
/// per-entity write rules live in `sea_repo`.
pub struct SeaRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: Arc<DbConn>,
    _entity: PhantomData<E>,
}

impl<E> SeaRepository<E>
where
    E: EntityTrait,
{
    /// Repositories of different entities share one pool through the `Arc`.
    pub fn new(db: Arc<DbConn>) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub(crate) async fn find_model(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<Option<E::Model>, RepoError> {
        E::find_by_id(id).one(self.db.as_ref()).await.map_err(map_db_err)
    }

    /// Delete one row by primary key; a missing row is `NotFound`.
    pub(crate) async fn delete_model(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
