//! Request guards
//!
//! Handlers call these in sequence with `?` before touching the service, so
//! a request that fails one never reaches the next.

use validator::Validate;

use crate::auth::{self, Policy, Principal};
use crate::models::{Budget, BudgetId};
use crate::services::BudgetService;
use crate::validation;

use super::error::{ApiError, ApiResult};

/// Reject ids that do not name a live budget
pub fn ensure_budget_exists(service: &BudgetService<'_>, id: BudgetId) -> ApiResult<()> {
    if service.does_exist(id)? {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("Budget not found: {}", id)))
    }
}

/// Reject commands that fail their declared constraints
pub fn validate_command<C: Validate>(command: &C) -> ApiResult<()> {
    Ok(validation::validate_command(command)?)
}

/// Reject principals that may not view or change `budget`
pub fn authorize_budget(principal: &Principal, budget: &Budget) -> ApiResult<()> {
    Ok(auth::authorize(principal, Some(budget), Policy::CanViewBudget)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MyBudgetPaths;
    use crate::models::{CreateBudgetCommand, Money, UserId};
    use crate::storage::Storage;
    use tempfile::TempDir;

    fn command(balance: i64) -> CreateBudgetCommand {
        CreateBudgetCommand {
            name: "Groceries".into(),
            balance: Money::from_cents(balance),
            init_amount: Money::from_cents(100),
            expenses: Vec::new(),
        }
    }

    #[test]
    fn test_existence_guard() {
        let temp_dir = TempDir::new().unwrap();
        let storage =
            Storage::open(MyBudgetPaths::with_base_dir(temp_dir.path().to_path_buf())).unwrap();
        let service = BudgetService::new(&storage);
        let owner = Principal::user(UserId::new());
        let id = service.create(command(0), &owner).unwrap();

        assert!(ensure_budget_exists(&service, id).is_ok());
        assert!(matches!(
            ensure_budget_exists(&service, BudgetId::new(404)),
            Err(ApiError::NotFound(_))
        ));
    }

    #[test]
    fn test_validation_guard_lists_fields() {
        let err = validate_command(&command(-5)).unwrap_err();
        match err {
            ApiError::Validation(fields) => assert_eq!(fields[0].field, "balance"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_authorization_guard() {
        let owner = UserId::new();
        let budget = Budget::new(owner, "Rent", Money::zero(), Money::zero());

        assert!(authorize_budget(&Principal::user(owner), &budget).is_ok());
        assert!(authorize_budget(&Principal::admin(UserId::new()), &budget).is_ok());
        assert!(matches!(
            authorize_budget(&Principal::user(UserId::new()), &budget),
            Err(ApiError::Forbidden(_))
        ));
    }
}
