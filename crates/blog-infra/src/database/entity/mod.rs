//! SeaORM entities mirroring the migrated schema.

pub mod post;
pub mod user;
