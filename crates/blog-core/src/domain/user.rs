use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - the author account posts belong to.
///
/// Accounts are owned by the identity subsystem; only what posts need is kept here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email,
            created_at: now,
            updated_at: now,
        }
    }

    /// Timestamps for a first insertion.
    pub fn stamp_insert(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = now;
    }

    /// Timestamps for an update of `stored`; `updated_at` never moves backwards.
    pub fn stamp_update(&mut self, stored: &User, now: DateTime<Utc>) {
        self.created_at = stored.created_at;
        self.updated_at = now.max(stored.updated_at).max(stored.created_at);
    }
}
