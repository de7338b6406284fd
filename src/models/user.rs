//! User model
//!
//! Users authenticate with an opaque API token issued at registration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::UserId;

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub api_token: String,
    #[serde(default)]
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user with a freshly issued token
    pub fn new(username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            api_token: issue_token(),
            is_admin,
            created_at: Utc::now(),
        }
    }

    /// Replace the API token, invalidating the old one
    pub fn rotate_token(&mut self) {
        self.api_token = issue_token();
    }
}

fn issue_token() -> String {
    Uuid::new_v4().simple().to_string()
}
