//! Service layer for MyBudget
//!
//! The service layer provides business logic on top of the storage layer:
//! invariant checks, ownership filtering and audit logging.

pub mod budget;
pub mod user;

pub use budget::BudgetService;
pub use user::UserService;
