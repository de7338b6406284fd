//! Budget lifecycle service
//!
//! Creates, reads, updates and soft-deletes budgets on top of the budget
//! store. Callers are expected to have run the request guards; the service
//! still re-checks the model invariants before anything is persisted.

use tracing::{error, info};

use crate::audit::EntityType;
use crate::auth::Principal;
use crate::error::{MyBudgetError, MyBudgetResult};
use crate::models::{
    Budget, BudgetId, BudgetSummary, CreateBudgetCommand, Expense, UpdateBudgetCommand, UserId,
};
use crate::storage::Storage;

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Summaries of the live budgets visible to a user
    ///
    /// Admins see every live budget, everyone else only their own.
    pub fn list_brief(&self, owner_id: UserId, is_admin: bool) -> MyBudgetResult<Vec<BudgetSummary>> {
        let budgets = if is_admin {
            self.storage.budgets.get_all()?
        } else {
            self.storage.budgets.get_by_owner(owner_id)?
        };

        Ok(budgets
            .iter()
            .filter(|b| b.is_live())
            .map(Budget::summary)
            .collect())
    }

    /// Get a live budget by id
    pub fn get_by_id(&self, id: BudgetId) -> MyBudgetResult<Budget> {
        self.storage
            .budgets
            .get(id)?
            .filter(Budget::is_live)
            .ok_or_else(|| MyBudgetError::budget_not_found(id))
    }

    /// Create a budget owned by `principal`, dated today
    pub fn create(&self, command: CreateBudgetCommand, principal: &Principal) -> MyBudgetResult<BudgetId> {
        let mut budget = Budget::new(
            principal.id,
            command.name.trim(),
            command.balance,
            command.init_amount,
        );
        budget.expenses = command.expenses.iter().map(Expense::from).collect();

        check_invariants(&budget)?;

        let id = self.storage.budgets.create(budget)?;
        if let Err(e) = self.storage.budgets.save() {
            self.storage.budgets.remove(id)?;
            return Err(e);
        }

        let budget = self.get_by_id(id)?;
        audited(
            id,
            self.storage.log_create(
                EntityType::Budget,
                id.to_string(),
                Some(budget.name.clone()),
                &budget,
                Some(principal.id),
            ),
        );

        info!(budget_id = %id, owner = %principal.id, "budget created");
        Ok(id)
    }

    /// Replace the editable fields of the budget the command addresses
    pub fn update(&self, command: &UpdateBudgetCommand, actor: Option<UserId>) -> MyBudgetResult<Budget> {
        let id = command
            .budget_id
            .ok_or_else(|| MyBudgetError::invalid_field("budgetId", "is required"))?;

        let before = self.get_by_id(id)?;
        let mut budget = before.clone();

        budget.name = command.name.trim().to_string();
        budget.balance = command.balance;
        budget.init_amount = command.init_amount;
        budget.expenses = command.expenses.iter().map(Expense::from).collect();
        budget.is_deleted = command.is_deleted;
        if let Some(date) = command.creation_date {
            budget.creation_date = date;
        }
        budget.touch();

        check_invariants(&budget)?;

        self.storage.budgets.update(budget.clone())?;
        self.save_or_restore(&before)?;

        audited(
            id,
            self.storage.log_update(
                EntityType::Budget,
                id.to_string(),
                Some(budget.name.clone()),
                &before,
                &budget,
                actor,
            ),
        );

        info!(budget_id = %id, deleted = budget.is_deleted, "budget updated");
        Ok(budget)
    }

    /// Soft-delete a live budget
    pub fn delete(&self, id: BudgetId, actor: Option<UserId>) -> MyBudgetResult<Budget> {
        let before = self.get_by_id(id)?;
        let mut budget = before.clone();
        budget.mark_deleted();

        self.storage.budgets.update(budget.clone())?;
        self.save_or_restore(&before)?;

        audited(
            id,
            self.storage.log_delete(
                EntityType::Budget,
                id.to_string(),
                Some(budget.name.clone()),
                &budget,
                actor,
            ),
        );

        info!(budget_id = %id, "budget deleted");
        Ok(budget)
    }

    /// Whether `id` names a live budget
    pub fn does_exist(&self, id: BudgetId) -> MyBudgetResult<bool> {
        Ok(self
            .storage
            .budgets
            .get(id)?
            .is_some_and(|b| b.is_live()))
    }

    /// Persist the table, putting `before` back in memory if the write fails
    fn save_or_restore(&self, before: &Budget) -> MyBudgetResult<()> {
        if let Err(e) = self.storage.budgets.save() {
            self.storage.budgets.update(before.clone())?;
            return Err(e);
        }
        Ok(())
    }
}

/// Log a failed audit append; the change itself is already saved
fn audited(id: BudgetId, result: MyBudgetResult<()>) {
    if let Err(e) = result {
        error!(budget_id = %id, error = %e, "failed to write audit entry");
    }
}

fn check_invariants(budget: &Budget) -> MyBudgetResult<()> {
    budget
        .validate()
        .map_err(|e| MyBudgetError::invalid_field(e.field(), e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::MyBudgetPaths;
    use crate::models::{CreateExpenseCommand, Money};
    use chrono::{NaiveDate, Utc};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = MyBudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths).unwrap();
        (temp_dir, storage)
    }

    /// Put a directory where `budgets.json` should be so the next save fails
    fn block_budget_file(temp_dir: &TempDir) {
        let paths = MyBudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let file = paths.budgets_file();
        if file.exists() {
            fs::remove_file(&file).unwrap();
        }
        fs::create_dir(&file).unwrap();
    }

    fn unblock_budget_file(temp_dir: &TempDir) {
        let paths = MyBudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        fs::remove_dir(paths.budgets_file()).unwrap();
    }

    fn groceries() -> CreateBudgetCommand {
        CreateBudgetCommand {
            name: "Groceries".into(),
            balance: Money::zero(),
            init_amount: Money::from_cents(100),
            expenses: Vec::new(),
        }
    }

    fn edit_of(budget: &Budget) -> UpdateBudgetCommand {
        UpdateBudgetCommand {
            budget_id: Some(budget.id),
            name: budget.name.clone(),
            balance: budget.balance,
            creation_date: None,
            expenses: Vec::new(),
            init_amount: budget.init_amount,
            is_deleted: false,
        }
    }

    #[test]
    fn test_create_then_get() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = Principal::user(UserId::new());

        let id = service.create(groceries(), &owner).unwrap();
        let budget = service.get_by_id(id).unwrap();

        assert_eq!(budget.owner_id, owner.id);
        assert_eq!(budget.name, "Groceries");
        assert_eq!(budget.balance, Money::zero());
        assert_eq!(budget.init_amount.cents(), 100);
        assert_eq!(budget.creation_date, Utc::now().date_naive());
        assert!(service.does_exist(id).unwrap());
    }

    #[test]
    fn test_missing_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);

        assert!(!service.does_exist(BudgetId::new(7)).unwrap());
        assert!(service.get_by_id(BudgetId::new(7)).unwrap_err().is_not_found());
    }

    #[test]
    fn test_list_brief_respects_ownership() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let alice = Principal::user(UserId::new());
        let bob = Principal::user(UserId::new());

        let a1 = service.create(groceries(), &alice).unwrap();
        service.create(groceries(), &bob).unwrap();
        let a2 = service.create(groceries(), &alice).unwrap();
        service.delete(a2, Some(alice.id)).unwrap();

        let mine = service.list_brief(alice.id, false).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, a1);

        let all = service.list_brief(UserId::new(), true).unwrap();
        assert_eq!(all.len(), 2);
        assert!(all[0].id < all[1].id);
    }

    #[test]
    fn test_update_replaces_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = Principal::user(UserId::new());
        let id = service.create(groceries(), &owner).unwrap();
        let budget = service.get_by_id(id).unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut command = edit_of(&budget);
        command.name = "Food".into();
        command.balance = Money::from_cents(2500);
        command.creation_date = Some(date);
        command.expenses = vec![CreateExpenseCommand {
            description: "Milk".into(),
            amount: Money::from_cents(350),
            date,
        }];

        let updated = service.update(&command, Some(owner.id)).unwrap();

        assert_eq!(updated.name, "Food");
        assert_eq!(updated.balance.cents(), 2500);
        assert_eq!(updated.creation_date, date);
        assert_eq!(updated.total_spent().cents(), 350);
        assert_eq!(service.get_by_id(id).unwrap(), updated);

        let entries = storage.audit().read_all().unwrap();
        let last = entries.last().unwrap();
        assert!(last.diff_summary.as_deref().unwrap().contains("name"));
        assert_eq!(last.actor, Some(owner.id));
    }

    #[test]
    fn test_update_requires_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = Principal::user(UserId::new());
        let id = service.create(groceries(), &owner).unwrap();

        let mut command = edit_of(&service.get_by_id(id).unwrap());
        command.budget_id = None;

        assert!(service.update(&command, None).unwrap_err().is_validation());
    }

    #[test]
    fn test_update_rejects_negative_balance() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = Principal::user(UserId::new());
        let id = service.create(groceries(), &owner).unwrap();

        let mut command = edit_of(&service.get_by_id(id).unwrap());
        command.balance = Money::from_cents(-1);

        assert!(service.update(&command, None).unwrap_err().is_validation());
        assert_eq!(service.get_by_id(id).unwrap().balance, Money::zero());
    }

    #[test]
    fn test_delete_twice() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = Principal::user(UserId::new());
        let id = service.create(groceries(), &owner).unwrap();

        service.delete(id, Some(owner.id)).unwrap();

        assert!(!service.does_exist(id).unwrap());
        assert!(service.delete(id, Some(owner.id)).unwrap_err().is_not_found());
        // Still on disk, just flagged
        assert!(storage.budgets.get(id).unwrap().unwrap().is_deleted);
    }

    #[test]
    fn test_deleted_budget_cannot_be_updated() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = Principal::user(UserId::new());
        let id = service.create(groceries(), &owner).unwrap();
        let command = edit_of(&service.get_by_id(id).unwrap());

        service.delete(id, None).unwrap();

        assert!(service.update(&command, None).unwrap_err().is_not_found());
    }

    #[test]
    fn test_concurrent_creates_all_persist() {
        let (temp_dir, storage) = create_test_storage();
        const THREADS: usize = 16;
        const PER_THREAD: usize = 25;

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    let storage = &storage;
                    scope.spawn(move || {
                        let service = BudgetService::new(storage);
                        let owner = Principal::user(UserId::new());
                        (0..PER_THREAD)
                            .map(|_| service.create(groceries(), &owner))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            for handle in handles {
                for result in handle.join().unwrap() {
                    result.unwrap();
                }
            }
        });

        let paths = MyBudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let reloaded = Storage::open(paths).unwrap();
        let ids: Vec<u64> = reloaded
            .budgets
            .get_all()
            .unwrap()
            .iter()
            .map(|b| b.id.value())
            .collect();
        let expected: Vec<u64> = (1..=(THREADS * PER_THREAD) as u64).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn test_create_rejects_overflowing_expense_total() {
        let (_temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = Principal::user(UserId::new());
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let mut command = groceries();
        command.expenses = [i64::MAX, 1]
            .into_iter()
            .map(|cents| CreateExpenseCommand {
                description: "Big".into(),
                amount: Money::from_cents(cents),
                date,
            })
            .collect();

        let err = service.create(command, &owner).unwrap_err();
        assert!(err.is_validation());
        assert!(service.list_brief(owner.id, false).unwrap().is_empty());
    }

    #[test]
    fn test_failed_create_is_not_kept_in_memory() {
        let (temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = Principal::user(UserId::new());

        block_budget_file(&temp_dir);
        assert!(service.create(groceries(), &owner).is_err());
        assert!(storage.budgets.get_all().unwrap().is_empty());

        unblock_budget_file(&temp_dir);
        let id = service.create(groceries(), &owner).unwrap();
        assert_eq!(id, BudgetId::new(2));
        assert_eq!(service.list_brief(owner.id, false).unwrap().len(), 1);
    }

    #[test]
    fn test_failed_update_and_delete_restore_previous_state() {
        let (temp_dir, storage) = create_test_storage();
        let service = BudgetService::new(&storage);
        let owner = Principal::user(UserId::new());
        let id = service.create(groceries(), &owner).unwrap();
        let original = service.get_by_id(id).unwrap();

        block_budget_file(&temp_dir);

        let mut command = edit_of(&original);
        command.name = "Food".into();
        assert!(service.update(&command, Some(owner.id)).is_err());
        assert_eq!(service.get_by_id(id).unwrap(), original);

        assert!(service.delete(id, Some(owner.id)).is_err());
        assert!(service.does_exist(id).unwrap());
    }
}
