//! Budget display formatting
//!
//! Formats budgets for terminal output in table and detail views.

use std::collections::HashMap;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budget, BudgetSummary, UserId};

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Initial")]
    init_amount: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Created")]
    created: String,
}

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn owner_label(owners: &HashMap<UserId, String>, id: UserId) -> String {
    owners
        .get(&id)
        .cloned()
        .unwrap_or_else(|| id.to_string())
}

/// Format budget summaries as a table, naming owners where known
pub fn format_budget_list(summaries: &[BudgetSummary], owners: &HashMap<UserId, String>) -> String {
    if summaries.is_empty() {
        return "No budgets found.\n".to_string();
    }

    let rows = summaries.iter().map(|s| BudgetRow {
        id: s.id.to_string(),
        name: s.name.clone(),
        owner: owner_label(owners, s.owner_id),
        balance: s.balance.to_string(),
        init_amount: s.init_amount.to_string(),
        spent: s.total_spent.to_string(),
        created: s.creation_date.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}

/// Format one budget with its expenses
pub fn format_budget_details(budget: &Budget, owner: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget #{}: {}\n", budget.id, budget.name));
    output.push_str(&format!("  Owner:          {}\n", owner));
    output.push_str(&format!("  Created:        {}\n", budget.creation_date));
    output.push_str(&format!("  Initial amount: {}\n", budget.init_amount));
    output.push_str(&format!("  Balance:        {}\n", budget.balance));
    output.push_str(&format!("  Total spent:    {}\n", budget.total_spent()));
    if budget.is_deleted {
        output.push_str("  Status:         Deleted\n");
    }

    if budget.expenses.is_empty() {
        output.push_str("\nNo expenses recorded.\n");
        return output;
    }

    let rows = budget.expenses.iter().map(|e| ExpenseRow {
        date: e.date.to_string(),
        description: e.description.clone(),
        amount: e.amount.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    output.push_str(&format!("\n{}\n", table));
    output
}
