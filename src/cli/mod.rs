//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod budget;
pub mod user;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use user::{handle_user_command, UserCommands};
