//! Display formatting for CLI output
//!
//! Renders budgets and users as terminal tables.

pub mod budget;
pub mod user;

pub use budget::{format_budget_details, format_budget_list};
pub use user::format_user_list;
