//! User repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

use serde::{Deserialize, Serialize};

use crate::error::MyBudgetError;
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct UserData {
    #[serde(default)]
    users: Vec<User>,
}

/// Repository for registered users
pub struct UserRepository {
    path: PathBuf,
    users: RwLock<HashMap<UserId, User>>,
    save_lock: Mutex<()>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            users: RwLock::new(HashMap::new()),
            save_lock: Mutex::new(()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), MyBudgetError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut users = self
            .users
            .write()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        users.clear();
        for user in file_data.users {
            users.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk, ordered by registration time
    pub fn save(&self) -> Result<(), MyBudgetError> {
        let _guard = self
            .save_lock
            .lock()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire save lock: {}", e)))?;

        let file_data = UserData {
            users: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>, MyBudgetError> {
        let users = self
            .users
            .read()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(users.get(&id).cloned())
    }

    /// Find the user holding `token`
    pub fn find_by_token(&self, token: &str) -> Result<Option<User>, MyBudgetError> {
        let users = self
            .users
            .read()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(users.values().find(|u| u.api_token == token).cloned())
    }

    /// Find a user by username (case-insensitive)
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, MyBudgetError> {
        let users = self
            .users
            .read()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(users
            .values()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    /// Insert or replace a user
    pub fn upsert(&self, user: User) -> Result<(), MyBudgetError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        users.insert(user.id, user);
        Ok(())
    }

    /// Insert a user whose username is not taken yet (case-insensitive)
    pub fn insert_unique(&self, user: User) -> Result<(), MyBudgetError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if users
            .values()
            .any(|u| u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(MyBudgetError::Duplicate {
                entity_type: "User",
                identifier: user.username,
            });
        }

        users.insert(user.id, user);
        Ok(())
    }

    /// Forget a user that could not be persisted
    pub fn remove(&self, id: UserId) -> Result<Option<User>, MyBudgetError> {
        let mut users = self
            .users
            .write()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        Ok(users.remove(&id))
    }

    /// All users, oldest registration first
    pub fn get_all(&self) -> Result<Vec<User>, MyBudgetError> {
        let users = self
            .users
            .read()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = users.values().cloned().collect();
        list.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, UserRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = UserRepository::new(temp_dir.path().join("users.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_lookup_by_token_and_name() {
        let (_temp_dir, repo) = create_test_repo();
        let alice = User::new("alice", false);
        repo.upsert(alice.clone()).unwrap();

        assert_eq!(repo.find_by_token(&alice.api_token).unwrap(), Some(alice.clone()));
        assert!(repo.find_by_token("nope").unwrap().is_none());
        assert_eq!(repo.find_by_username("ALICE").unwrap().unwrap().id, alice.id);
        assert_eq!(repo.get(alice.id).unwrap().unwrap().username, "alice");
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let admin = User::new("root", true);
        repo.upsert(admin.clone()).unwrap();
        repo.save().unwrap();

        let reloaded = UserRepository::new(temp_dir.path().join("users.json"));
        reloaded.load().unwrap();

        assert_eq!(reloaded.get_all().unwrap().len(), 1);
        assert!(reloaded.get(admin.id).unwrap().unwrap().is_admin);
    }

    #[test]
    fn test_insert_unique_rejects_taken_name() {
        let (_temp_dir, repo) = create_test_repo();
        repo.insert_unique(User::new("alice", false)).unwrap();

        let err = repo.insert_unique(User::new("Alice", true)).unwrap_err();

        assert!(matches!(err, MyBudgetError::Duplicate { .. }));
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }
}
