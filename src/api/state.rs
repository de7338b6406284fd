//! Application state for the API server

use std::sync::Arc;

use crate::services::{BudgetService, UserService};
use crate::storage::Storage;

/// API server state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    /// API version
    pub version: String,
}

impl AppState {
    pub fn new(storage: Arc<Storage>) -> Self {
        Self {
            storage,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn budgets(&self) -> BudgetService<'_> {
        BudgetService::new(&self.storage)
    }

    pub fn users(&self) -> UserService<'_> {
        UserService::new(&self.storage)
    }
}
