//! User service
//!
//! Registers users, issues their API tokens and resolves tokens back into a
//! [`Principal`] for the HTTP layer.

use tracing::{error, info};

use crate::audit::EntityType;
use crate::auth::Principal;
use crate::error::{MyBudgetError, MyBudgetResult};
use crate::models::{User, UserId};
use crate::storage::Storage;

/// Service for user management and authentication
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Register a new user with a fresh API token
    pub fn register(&self, username: &str, is_admin: bool) -> MyBudgetResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(MyBudgetError::invalid_field("username", "cannot be empty"));
        }

        let user = User::new(username, is_admin);
        self.storage.users.insert_unique(user.clone())?;
        if let Err(e) = self.storage.users.save() {
            self.storage.users.remove(user.id)?;
            return Err(e);
        }

        // The token itself stays out of the audit trail
        if let Err(e) = self.storage.log_create(
            EntityType::User,
            user.id.to_string(),
            Some(user.username.clone()),
            &serde_json::json!({ "username": user.username, "isAdmin": user.is_admin }),
            None,
        ) {
            error!(user_id = %user.id, error = %e, "failed to write audit entry");
        }

        info!(user_id = %user.id, admin = is_admin, "user registered");
        Ok(user)
    }

    /// Resolve a bearer token to the principal that owns it
    pub fn authenticate(&self, token: &str) -> MyBudgetResult<Principal> {
        let token = token.trim();
        if token.is_empty() {
            return Err(MyBudgetError::Unauthenticated("missing token".into()));
        }

        self.storage
            .users
            .find_by_token(token)?
            .map(|user| Principal::from(&user))
            .ok_or_else(|| MyBudgetError::Unauthenticated("unknown token".into()))
    }

    pub fn get(&self, id: UserId) -> MyBudgetResult<User> {
        self.storage
            .users
            .get(id)?
            .ok_or_else(|| MyBudgetError::user_not_found(id))
    }

    pub fn find_by_username(&self, username: &str) -> MyBudgetResult<User> {
        self.storage
            .users
            .find_by_username(username)?
            .ok_or_else(|| MyBudgetError::user_not_found(username))
    }

    pub fn list(&self) -> MyBudgetResult<Vec<User>> {
        self.storage.users.get_all()
    }

    /// Issue a new token, invalidating the old one
    pub fn rotate_token(&self, id: UserId) -> MyBudgetResult<User> {
        let before = self.get(id)?;
        let mut user = before.clone();
        user.rotate_token();

        self.storage.users.upsert(user.clone())?;
        if let Err(e) = self.storage.users.save() {
            self.storage.users.upsert(before)?;
            return Err(e);
        }

        info!(user_id = %id, "api token rotated");
        Ok(user)
    }
}
