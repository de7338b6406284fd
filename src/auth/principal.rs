//! The authenticated identity behind a request

use serde::Serialize;

use crate::models::{User, UserId};

/// Who is making the request and what they may do regardless of ownership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Principal {
    pub id: UserId,
    pub is_admin: bool,
}

impl Principal {
    pub fn user(id: UserId) -> Self {
        Self {
            id,
            is_admin: false,
        }
    }

    pub fn admin(id: UserId) -> Self {
        Self { id, is_admin: true }
    }
}

impl From<&User> for Principal {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            is_admin: user.is_admin,
        }
    }
}
