//! Budget CLI commands
//!
//! Administrative access to budgets. The CLI acts with full rights, so no
//! ownership check applies; changes are audited without an actor.

use std::collections::HashMap;
use std::io::{self, Write};

use clap::Subcommand;

use crate::auth::Principal;
use crate::display::{format_budget_details, format_budget_list};
use crate::error::{MyBudgetError, MyBudgetResult};
use crate::export::ExportFormat;
use crate::models::{BudgetId, BudgetSummary, CreateBudgetCommand, Money, UserId};
use crate::services::{BudgetService, UserService};
use crate::storage::Storage;
use crate::validation::validate_command;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List live budgets
    List {
        /// Only budgets owned by this user
        #[arg(short, long)]
        owner: Option<String>,
        /// Output format: table, json, yaml or csv
        #[arg(short, long, default_value = "table")]
        format: String,
    },
    /// Create a budget for a user
    Create {
        /// Owner's username
        owner: String,
        /// Budget name
        name: String,
        /// Current balance (e.g., "250.00" or "250")
        #[arg(short, long, default_value = "0")]
        balance: String,
        /// Initial amount (e.g., "1000.00")
        #[arg(short, long, default_value = "0")]
        init_amount: String,
    },
    /// Show a budget with its expenses
    Show {
        /// Budget ID
        id: BudgetId,
    },
    /// Delete a budget
    Delete {
        /// Budget ID
        id: BudgetId,
    },
}

fn parse_amount(field: &str, raw: &str) -> MyBudgetResult<Money> {
    Money::parse(raw).map_err(|e| {
        MyBudgetError::invalid_field(
            field,
            format!("invalid amount '{}', use a format like '100.00': {}", raw, e),
        )
    })
}

fn print_summaries(summaries: &[BudgetSummary], format: &str, users: &UserService<'_>) -> MyBudgetResult<()> {
    if format.eq_ignore_ascii_case("table") {
        let owners: HashMap<_, _> = users
            .list()?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();
        print!("{}", format_budget_list(summaries, &owners));
        return Ok(());
    }

    let format: ExportFormat = format.parse()?;
    let mut stdout = io::stdout().lock();
    format.write(&mut stdout, &summaries, summaries)?;
    writeln!(stdout)?;
    Ok(())
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> MyBudgetResult<()> {
    let service = BudgetService::new(storage);
    let users = UserService::new(storage);

    match cmd {
        BudgetCommands::List { owner, format } => {
            let summaries = match owner {
                Some(name) => {
                    let user = users.find_by_username(&name)?;
                    service.list_brief(user.id, false)?
                }
                // Admin listing ignores the owner id
                None => service.list_brief(UserId::new(), true)?,
            };
            print_summaries(&summaries, &format, &users)?;
        }

        BudgetCommands::Create {
            owner,
            name,
            balance,
            init_amount,
        } => {
            let user = users.find_by_username(&owner)?;
            let command = CreateBudgetCommand {
                name,
                balance: parse_amount("balance", &balance)?,
                init_amount: parse_amount("initAmount", &init_amount)?,
                expenses: Vec::new(),
            };
            validate_command(&command)?;

            let id = service.create(command, &Principal::from(&user))?;

            println!("Created budget #{} for {}", id, user.username);
        }

        BudgetCommands::Show { id } => {
            let budget = service.get_by_id(id)?;
            let owner = users
                .get(budget.owner_id)
                .map(|u| u.username)
                .unwrap_or_else(|_| budget.owner_id.to_string());
            print!("{}", format_budget_details(&budget, &owner));
        }

        BudgetCommands::Delete { id } => {
            let budget = service.delete(id, None)?;
            println!("Deleted budget #{} ({})", budget.id, budget.name);
        }
    }

    Ok(())
}
