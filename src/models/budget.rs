//! Budget model
//!
//! A budget belongs to exactly one user and owns its expenses. Deletion is a
//! soft delete: the record stays in the store with `is_deleted` set.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::Expense;
use super::ids::{BudgetId, UserId};
use super::money::Money;

/// A budget with its expenses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: BudgetId,
    pub owner_id: UserId,
    pub name: String,
    pub balance: Money,
    pub creation_date: NaiveDate,
    pub init_amount: Money,

    #[serde(default)]
    pub is_deleted: bool,

    #[serde(default)]
    pub expenses: Vec<Expense>,

    /// When this budget was last modified
    pub updated_at: DateTime<Utc>,
}

impl Budget {
    /// Create a live budget dated today
    ///
    /// The id is a placeholder until the store assigns the real one.
    pub fn new(owner_id: UserId, name: impl Into<String>, balance: Money, init_amount: Money) -> Self {
        let now = Utc::now();
        Self {
            id: BudgetId::new(0),
            owner_id,
            name: name.into(),
            balance,
            creation_date: now.date_naive(),
            init_amount,
            is_deleted: false,
            expenses: Vec::new(),
            updated_at: now,
        }
    }

    pub fn is_live(&self) -> bool {
        !self.is_deleted
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Sum of all expense amounts
    pub fn total_spent(&self) -> Money {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Sum of all expense amounts, or `None` if it does not fit in a `Money`
    pub fn checked_total_spent(&self) -> Option<Money> {
        self.expenses
            .iter()
            .try_fold(Money::zero(), |acc, e| acc.checked_add(e.amount))
    }

    /// Flag the budget as deleted
    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.touch();
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Check the model invariants
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.name.trim().is_empty() {
            return Err(BudgetValidationError::EmptyName);
        }
        if self.balance.is_negative() {
            return Err(BudgetValidationError::NegativeBalance);
        }
        if self.init_amount.is_negative() {
            return Err(BudgetValidationError::NegativeInitAmount);
        }
        if self.expenses.iter().any(|e| e.amount.is_negative()) {
            return Err(BudgetValidationError::NegativeExpense);
        }
        if self.checked_total_spent().is_none() {
            return Err(BudgetValidationError::ExpenseTotalOverflow);
        }
        Ok(())
    }

    pub fn summary(&self) -> BudgetSummary {
        BudgetSummary {
            id: self.id,
            owner_id: self.owner_id,
            name: self.name.clone(),
            balance: self.balance,
            init_amount: self.init_amount,
            creation_date: self.creation_date,
            expense_count: self.expenses.len(),
            total_spent: self.total_spent(),
        }
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} (balance: {})", self.id, self.name, self.balance)
    }
}

/// List-friendly projection of a budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub id: BudgetId,
    pub owner_id: UserId,
    pub name: String,
    pub balance: Money,
    pub init_amount: Money,
    pub creation_date: NaiveDate,
    pub expense_count: usize,
    pub total_spent: Money,
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    EmptyName,
    NegativeBalance,
    NegativeInitAmount,
    NegativeExpense,
    ExpenseTotalOverflow,
}

impl BudgetValidationError {
    /// The command field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyName => "name",
            Self::NegativeBalance => "balance",
            Self::NegativeInitAmount => "initAmount",
            Self::NegativeExpense | Self::ExpenseTotalOverflow => "expenses",
        }
    }
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Budget name cannot be empty"),
            Self::NegativeBalance => write!(f, "Balance cannot be negative"),
            Self::NegativeInitAmount => write!(f, "Initial amount cannot be negative"),
            Self::NegativeExpense => write!(f, "Expense amounts cannot be negative"),
            Self::ExpenseTotalOverflow => write!(f, "Expense total is too large"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
