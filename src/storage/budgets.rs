//! Budget repository for JSON storage
//!
//! Budgets live in `budgets.json` together with the next id to hand out, so
//! ids are never reused across restarts. Deleted budgets stay in the file
//! with their flag set.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Mutex, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use crate::error::MyBudgetError;
use crate::models::{Budget, BudgetId, UserId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk layout of `budgets.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BudgetData {
    #[serde(default = "first_id")]
    next_id: BudgetId,
    #[serde(default)]
    budgets: Vec<Budget>,
}

impl Default for BudgetData {
    fn default() -> Self {
        Self {
            next_id: first_id(),
            budgets: Vec::new(),
        }
    }
}

fn first_id() -> BudgetId {
    BudgetId::new(1)
}

#[derive(Debug)]
struct BudgetTable {
    next_id: BudgetId,
    budgets: BTreeMap<BudgetId, Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    table: RwLock<BudgetTable>,
    /// Held across snapshot and write so saves land on disk in order
    save_lock: Mutex<()>,
}

impl BudgetRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            table: RwLock::new(BudgetTable {
                next_id: first_id(),
                budgets: BTreeMap::new(),
            }),
            save_lock: Mutex::new(()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BudgetTable>, MyBudgetError> {
        self.table
            .read()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BudgetTable>, MyBudgetError> {
        self.table
            .write()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire write lock: {}", e)))
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), MyBudgetError> {
        let file_data: BudgetData = read_json(&self.path)?;
        let mut table = self.write()?;

        table.budgets = file_data
            .budgets
            .into_iter()
            .map(|b| (b.id, b))
            .collect();

        // Never hand out an id at or below one already on disk
        let after_last = table
            .budgets
            .keys()
            .next_back()
            .map(BudgetId::next)
            .unwrap_or_else(first_id);
        table.next_id = file_data.next_id.max(after_last);

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), MyBudgetError> {
        let _guard = self
            .save_lock
            .lock()
            .map_err(|e| MyBudgetError::Storage(format!("Failed to acquire save lock: {}", e)))?;

        let file_data = {
            let table = self.read()?;
            BudgetData {
                next_id: table.next_id,
                budgets: table.budgets.values().cloned().collect(),
            }
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Insert a new budget under a freshly assigned id
    pub fn create(&self, mut budget: Budget) -> Result<BudgetId, MyBudgetError> {
        let mut table = self.write()?;
        let id = table.next_id;
        table.next_id = id.next();

        budget.id = id;
        table.budgets.insert(id, budget);
        Ok(id)
    }

    /// Get a budget by id, deleted or not
    pub fn get(&self, id: BudgetId) -> Result<Option<Budget>, MyBudgetError> {
        Ok(self.read()?.budgets.get(&id).cloned())
    }

    /// All budgets in id order
    pub fn get_all(&self) -> Result<Vec<Budget>, MyBudgetError> {
        Ok(self.read()?.budgets.values().cloned().collect())
    }

    /// Budgets owned by `owner_id`, in id order
    pub fn get_by_owner(&self, owner_id: UserId) -> Result<Vec<Budget>, MyBudgetError> {
        Ok(self
            .read()?
            .budgets
            .values()
            .filter(|b| b.owner_id == owner_id)
            .cloned()
            .collect())
    }

    /// Replace an existing budget
    pub fn update(&self, budget: Budget) -> Result<(), MyBudgetError> {
        let mut table = self.write()?;
        match table.budgets.get_mut(&budget.id) {
            Some(slot) => {
                *slot = budget;
                Ok(())
            }
            None => Err(MyBudgetError::budget_not_found(budget.id)),
        }
    }

    /// Drop a budget that never made it to disk
    ///
    /// The id stays consumed so it is not handed out again.
    pub fn remove(&self, id: BudgetId) -> Result<Option<Budget>, MyBudgetError> {
        Ok(self.write()?.budgets.remove(&id))
    }
}
