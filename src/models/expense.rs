//! Expense model
//!
//! Expenses only exist inside a budget's ordered expense list.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::money::Money;

/// A single expense recorded against a budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub description: String,
    pub amount: Money,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(description: impl Into<String>, amount: Money, date: NaiveDate) -> Self {
        Self {
            description: description.into(),
            amount,
            date,
        }
    }
}
