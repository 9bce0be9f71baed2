//! # Blog Core
//!
//! The domain layer of the blog.
//! This crate contains the post model and its rules, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::{DomainError, RepoError};
