//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//! This crate contains the SeaORM entities and repositories, and an in-memory store.
//!
//! ## Feature Flags
//!
//! - `sqlite` - SQLite support via SeaORM, in addition to PostgreSQL

pub mod database;
pub mod memory;
pub mod repositories;

pub use database::{DatabaseConfig, SeaPostRepository, SeaUserRepository};
pub use memory::{InMemoryPostRepository, InMemoryStore, InMemoryUserRepository};
pub use repositories::Repositories;
