//! User display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::User;

#[derive(Tabled)]
struct UserRow {
    #[tabled(rename = "Username")]
    username: String,
    #[tabled(rename = "Role")]
    role: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Registered")]
    created: String,
}

/// Format users as a table; tokens are never shown
pub fn format_user_list(users: &[User]) -> String {
    if users.is_empty() {
        return "No users registered.\n".to_string();
    }

    let rows = users.iter().map(|u| UserRow {
        username: u.username.clone(),
        role: if u.is_admin { "admin" } else { "user" },
        id: u.id.to_string(),
        created: u.created_at.format("%Y-%m-%d %H:%M").to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    format!("{}\n", table)
}
