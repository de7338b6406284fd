//! Audit log CLI command

use crate::error::MyBudgetResult;
use crate::storage::Storage;

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(storage: &Storage, count: usize) -> MyBudgetResult<()> {
    let entries = storage.audit().read_recent(count)?;

    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.format_human_readable());
    }

    Ok(())
}
