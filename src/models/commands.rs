//! Commands submitted by clients
//!
//! Commands are validated with `validator` before the lifecycle service maps
//! them onto budgets. They are never stored as-is.

use std::borrow::Cow;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::expense::Expense;
use super::ids::BudgetId;
use super::money::Money;
use crate::error::{MyBudgetError, MyBudgetResult};

fn non_negative(amount: &Money) -> Result<(), ValidationError> {
    if amount.is_negative() {
        let mut err = ValidationError::new("non_negative");
        err.message = Some(Cow::from("must not be negative"));
        return Err(err);
    }
    Ok(())
}

/// An expense as submitted inside a create or update command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseCommand {
    #[validate(length(min = 1, max = 256, message = "must be between 1 and 256 characters"))]
    pub description: String,

    #[validate(custom(function = "non_negative"))]
    pub amount: Money,

    pub date: NaiveDate,
}

impl From<&CreateExpenseCommand> for Expense {
    fn from(cmd: &CreateExpenseCommand) -> Self {
        Expense::new(cmd.description.trim(), cmd.amount, cmd.date)
    }
}

/// Request to create a budget for the current user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetCommand {
    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(custom(function = "non_negative"))]
    pub balance: Money,

    #[validate(custom(function = "non_negative"))]
    pub init_amount: Money,

    #[serde(default)]
    #[validate(nested)]
    pub expenses: Vec<CreateExpenseCommand>,
}

/// Request to replace the editable fields of an existing budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetCommand {
    /// Target budget; filled from the request path when omitted
    #[serde(default)]
    pub budget_id: Option<BudgetId>,

    #[validate(length(min = 1, max = 100, message = "must be between 1 and 100 characters"))]
    pub name: String,

    #[validate(custom(function = "non_negative"))]
    pub balance: Money,

    /// Left unchanged when omitted
    #[serde(default)]
    pub creation_date: Option<NaiveDate>,

    #[serde(default)]
    #[validate(nested)]
    pub expenses: Vec<CreateExpenseCommand>,

    #[validate(custom(function = "non_negative"))]
    pub init_amount: Money,

    #[serde(default)]
    pub is_deleted: bool,
}

impl UpdateBudgetCommand {
    /// Bind the command to the budget addressed by the request
    ///
    /// A body id that disagrees with `id` is rejected.
    pub fn for_budget(mut self, id: BudgetId) -> MyBudgetResult<Self> {
        match self.budget_id {
            Some(existing) if existing != id => Err(MyBudgetError::invalid_field(
                "budgetId",
                format!("does not match the addressed budget {}", id),
            )),
            _ => {
                self.budget_id = Some(id);
                Ok(self)
            }
        }
    }
}
