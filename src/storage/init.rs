//! Storage initialization
//!
//! Handles first-run setup: directories, default settings and empty data files

use serde_json::json;

use crate::config::paths::MyBudgetPaths;
use crate::config::settings::Settings;
use crate::error::MyBudgetError;

use super::file_io::write_json_atomic;

/// Initialize storage for a fresh installation
///
/// Existing files are left untouched, so running it twice is harmless.
pub fn initialize_storage(paths: &MyBudgetPaths) -> Result<(), MyBudgetError> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        Settings::default().save(paths)?;
    }

    if !paths.budgets_file().exists() {
        write_json_atomic(paths.budgets_file(), &json!({ "next_id": 1, "budgets": [] }))?;
    }

    if !paths.users_file().exists() {
        write_json_atomic(paths.users_file(), &json!({ "users": [] }))?;
    }

    Ok(())
}

/// Check if storage needs initialization
pub fn needs_initialization(paths: &MyBudgetPaths) -> bool {
    !paths.is_initialized() || !paths.budgets_file().exists() || !paths.users_file().exists()
}
