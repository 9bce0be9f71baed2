//! Domain entities - the core business objects.

mod post;
mod user;

pub use post::{Post, PostStatus, SLUG_MAX_LEN, TITLE_MAX_LEN, sort_by_default_ordering};
pub use user::User;
