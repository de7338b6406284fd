//! Response bodies that are not plain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{BudgetId, User, UserId};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Acknowledgement for create and delete
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    pub id: BudgetId,
}

impl MessageResponse {
    pub fn created(id: BudgetId) -> Self {
        Self {
            message: format!("Your budget id: {}", id),
            id,
        }
    }

    pub fn deleted(id: BudgetId) -> Self {
        Self {
            message: format!("Budget {} deleted", id),
            id,
        }
    }
}

/// The caller's own account, without the API token
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            is_admin: user.is_admin,
            created_at: user.created_at,
        }
    }
}
