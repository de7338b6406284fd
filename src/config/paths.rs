//! Path management for MyBudget
//!
//! ## Path Resolution Order
//!
//! 1. `MYBUDGET_DATA_DIR` environment variable (if set)
//! 2. The platform config directory reported by `directories`
//!    (`~/.config/mybudget` on Linux, `%APPDATA%\mybudget\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::MyBudgetError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "MYBUDGET_DATA_DIR";

/// Manages all paths used by MyBudget
#[derive(Debug, Clone)]
pub struct MyBudgetPaths {
    base_dir: PathBuf,
}

impl MyBudgetPaths {
    /// Resolve the base directory from the environment or the platform default
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, MyBudgetError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => ProjectDirs::from("", "", "mybudget")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    MyBudgetError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Create the base and data directories if they are missing
    pub fn ensure_directories(&self) -> Result<(), MyBudgetError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| MyBudgetError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| MyBudgetError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if MyBudget has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}
