//! Core data models for MyBudget
//!
//! Budgets with their expenses, users, the commands clients submit, and the
//! value types they share.

pub mod budget;
pub mod commands;
pub mod expense;
pub mod ids;
pub mod money;
pub mod user;

pub use budget::{Budget, BudgetSummary, BudgetValidationError};
pub use commands::{CreateBudgetCommand, CreateExpenseCommand, UpdateBudgetCommand};
pub use expense::Expense;
pub use ids::{BudgetId, UserId};
pub use money::Money;
pub use user::User;
