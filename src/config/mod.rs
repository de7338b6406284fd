//! Configuration module for MyBudget
//!
//! - Data directory resolution
//! - Persisted server settings

pub mod paths;
pub mod settings;

pub use paths::MyBudgetPaths;
pub use settings::{ServerSettings, Settings};
