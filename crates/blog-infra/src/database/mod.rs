//! Database connection management and SeaORM repositories.

mod connections;
mod sea_base;
pub mod sea_repo;

pub mod entity;

use sea_orm::{DbErr, SqlErr};

use blog_core::error::RepoError;

pub use connections::DatabaseConfig;
pub use sea_base::SeaRepository;
pub use sea_repo::{SeaPostRepository, SeaUserRepository};

/// Map a SeaORM error onto the repository error space.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => return RepoError::Constraint(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return RepoError::Constraint(msg),
        _ => {}
    }

    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        other => RepoError::Query(other.to_string()),
    }
}
