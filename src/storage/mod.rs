//! Storage layer for MyBudget
//!
//! JSON file storage with atomic writes. Each repository keeps its records in
//! memory behind a lock and rewrites its file on save. Every mutation is also
//! appended to the audit log.

pub mod budgets;
pub mod file_io;
pub mod init;
pub mod users;

pub use budgets::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use init::{initialize_storage, needs_initialization};
pub use users::UserRepository;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::MyBudgetPaths;
use crate::error::MyBudgetError;
use crate::models::UserId;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    pub budgets: BudgetRepository,
    pub users: UserRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: MyBudgetPaths) -> Result<Self, MyBudgetError> {
        paths.ensure_directories()?;

        Ok(Self {
            budgets: BudgetRepository::new(paths.budgets_file()),
            users: UserRepository::new(paths.users_file()),
            audit: AuditLogger::new(paths.audit_log()),
        })
    }

    /// Create storage and load everything already on disk
    pub fn open(paths: MyBudgetPaths) -> Result<Self, MyBudgetError> {
        let storage = Self::new(paths)?;
        storage.load_all()?;
        Ok(storage)
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), MyBudgetError> {
        self.budgets.load()?;
        self.users.load()?;
        Ok(())
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
        actor: Option<UserId>,
    ) -> Result<(), MyBudgetError> {
        let entry = AuditEntry::create(entity_type, entity_id, entity_name, entity).by(actor);
        self.audit.log(&entry)
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        actor: Option<UserId>,
    ) -> Result<(), MyBudgetError> {
        let entry =
            AuditEntry::update(entity_type, entity_id, entity_name, before, after).by(actor);
        self.audit.log(&entry)
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
        actor: Option<UserId>,
    ) -> Result<(), MyBudgetError> {
        let entry = AuditEntry::delete(entity_type, entity_id, entity_name, entity).by(actor);
        self.audit.log(&entry)
    }
}
