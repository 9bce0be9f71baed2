use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Maximum length of a post title, in characters.
pub const TITLE_MAX_LEN: usize = 250;

/// Maximum length of a post slug, in characters.
pub const SLUG_MAX_LEN: usize = 250;

/// Publication status of a post.
///
/// Persisted as a two-letter code (`DF` / `PB`), displayed with a label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostStatus {
    #[default]
    #[serde(rename = "DF")]
    Draft,
    #[serde(rename = "PB")]
    Published,
}

impl PostStatus {
    /// Every status, in declaration order.
    pub const ALL: [PostStatus; 2] = [PostStatus::Draft, PostStatus::Published];

    /// Stable short code stored in the database.
    pub const fn code(self) -> &'static str {
        match self {
            PostStatus::Draft => "DF",
            PostStatus::Published => "PB",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            PostStatus::Draft => "Draft",
            PostStatus::Published => "Published",
        }
    }

    /// Symbolic name of the choice.
    pub const fn name(self) -> &'static str {
        match self {
            PostStatus::Draft => "DRAFT",
            PostStatus::Published => "PUBLISHED",
        }
    }

    /// `(code, label)` pairs, suitable for rendering a select box.
    pub fn choices() -> [(&'static str, &'static str); 2] {
        Self::ALL.map(|s| (s.code(), s.label()))
    }

    pub fn values() -> [&'static str; 2] {
        Self::ALL.map(Self::code)
    }

    pub fn labels() -> [&'static str; 2] {
        Self::ALL.map(Self::label)
    }

    pub fn names() -> [&'static str; 2] {
        Self::ALL.map(Self::name)
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PostStatus {
    type Err = DomainError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|s| s.code() == code)
            .ok_or_else(|| {
                DomainError::Validation(format!(
                    "'{}' is not a valid post status (expected one of {:?})",
                    code,
                    Self::values()
                ))
            })
    }
}

/// Post entity - a blog post written by exactly one author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author_id: Uuid,
    pub body: String,
    pub publish: DateTime<Utc>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub status: PostStatus,
}

impl Post {
    /// Create a new draft post, published "now".
    pub fn new(author_id: Uuid, title: String, slug: String, body: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            author_id,
            body,
            publish: now,
            created: now,
            updated: now,
            status: PostStatus::default(),
        }
    }

    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_publish(mut self, publish: DateTime<Utc>) -> Self {
        self.publish = publish;
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }

    /// Check the field constraints, reporting every violation at once.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut problems = Vec::new();

        check_text("title", &self.title, TITLE_MAX_LEN, &mut problems);
        check_text("slug", &self.slug, SLUG_MAX_LEN, &mut problems);
        if !self.slug.is_empty() && !is_valid_slug(&self.slug) {
            problems.push(
                "slug may only contain letters, numbers, underscores or hyphens".to_string(),
            );
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(problems.join("; ")))
        }
    }

    /// Timestamps for a first insertion.
    pub fn stamp_insert(&mut self, now: DateTime<Utc>) {
        self.created = now;
        self.updated = now;
    }

    /// Timestamps for an update of `stored`.
    ///
    /// `created` always comes from the stored row and `updated` never moves backwards.
    pub fn stamp_update(&mut self, stored: &Post, now: DateTime<Utc>) {
        self.created = stored.created;
        self.updated = now.max(stored.updated).max(stored.created);
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

/// Default ordering for posts: most recently published first.
///
/// Ties are broken by creation time, newest first.
pub fn sort_by_default_ordering(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        b.publish
            .cmp(&a.publish)
            .then_with(|| b.created.cmp(&a.created))
    });
}

fn check_text(field: &str, value: &str, max_len: usize, problems: &mut Vec<String>) {
    if value.trim().is_empty() {
        problems.push(format!("{} may not be blank", field));
        return;
    }

    let len = value.chars().count();
    if len > max_len {
        problems.push(format!(
            "{} has at most {} characters (it has {})",
            field, max_len, len
        ));
    }
}

fn is_valid_slug(slug: &str) -> bool {
    slug.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn post(title: &str, slug: &str) -> Post {
        Post::new(
            Uuid::new_v4(),
            title.to_string(),
            slug.to_string(),
            "Body".to_string(),
        )
    }

    #[test]
    fn test_new_post_is_draft_and_displays_title() {
        let post = post("Hello", "hello");

        assert_eq!(post.status, PostStatus::Draft);
        assert_eq!(post.status.code(), "DF");
        assert_eq!(post.to_string(), "Hello");
        assert_eq!(post.created, post.updated);
        assert_eq!(post.publish, post.created);
        assert!(!post.is_published());
    }

    #[test]
    fn test_status_choices() {
        assert_eq!(
            PostStatus::choices(),
            [("DF", "Draft"), ("PB", "Published")]
        );
        assert_eq!(PostStatus::names(), ["DRAFT", "PUBLISHED"]);
        assert_eq!(PostStatus::labels(), ["Draft", "Published"]);
        assert_eq!(PostStatus::values(), ["DF", "PB"]);
    }

    #[test]
    fn test_status_parses_only_codes() {
        assert_eq!("PB".parse::<PostStatus>(), Ok(PostStatus::Published));
        assert_eq!("DF".parse::<PostStatus>(), Ok(PostStatus::Draft));
        assert!("Published".parse::<PostStatus>().is_err());
        assert!("pb".parse::<PostStatus>().is_err());
        assert!("".parse::<PostStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_as_code() {
        let json = serde_json::to_string(&PostStatus::Published).unwrap();
        assert_eq!(json, "\"PB\"");

        let status: PostStatus = serde_json::from_str("\"DF\"").unwrap();
        assert_eq!(status, PostStatus::Draft);

        assert!(serde_json::from_str::<PostStatus>("\"XX\"").is_err());
    }

    #[test]
    fn test_validate_accepts_limits() {
        let title = "é".repeat(TITLE_MAX_LEN);
        let slug = "a".repeat(SLUG_MAX_LEN);
        assert!(post(&title, &slug).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_oversized_and_blank_fields() {
        let long = "a".repeat(TITLE_MAX_LEN + 1);
        let err = post(&long, "").validate().unwrap_err();

        let DomainError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert!(msg.contains("title has at most 250 characters"));
        assert!(msg.contains("slug may not be blank"));
    }

    #[test]
    fn test_validate_rejects_bad_slug() {
        assert!(post("Hello", "hello world").validate().is_err());
        assert!(post("Hello", "héllo").validate().is_err());
        assert!(post("Hello", "hello-world_2").validate().is_ok());
    }

    #[test]
    fn test_stamp_update_keeps_created_and_is_monotonic() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut stored = post("Hello", "hello");
        stored.stamp_insert(t0);

        let mut edited = stored.clone();
        edited.created = t0 + Duration::days(3);
        edited.stamp_update(&stored, t0 + Duration::hours(1));
        assert_eq!(edited.created, t0);
        assert_eq!(edited.updated, t0 + Duration::hours(1));

        // A clock that went backwards must not move `updated` back.
        let mut again = edited.clone();
        again.stamp_update(&edited, t0 - Duration::hours(5));
        assert_eq!(again.created, t0);
        assert_eq!(again.updated, t0 + Duration::hours(1));
        assert!(again.updated >= again.created);
    }

    #[test]
    fn test_default_ordering_is_publish_desc() {
        let t0 = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut posts = vec![
            post("old", "old").with_publish(t0),
            post("new", "new").with_publish(t0 + Duration::days(2)),
            post("mid", "mid").with_publish(t0 + Duration::days(1)),
        ];

        sort_by_default_ordering(&mut posts);

        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["new", "mid", "old"]);
    }
}
