//! User CLI commands

use clap::Subcommand;

use crate::display::format_user_list;
use crate::error::MyBudgetResult;
use crate::services::UserService;
use crate::storage::Storage;

/// User subcommands
#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user and print their API token
    Add {
        /// Username
        username: String,
        /// Grant admin rights (may view and change every budget)
        #[arg(long)]
        admin: bool,
    },
    /// List registered users
    List,
    /// Issue a new API token, invalidating the old one
    RotateToken {
        /// Username
        username: String,
    },
}

/// Handle a user command
pub fn handle_user_command(storage: &Storage, cmd: UserCommands) -> MyBudgetResult<()> {
    let service = UserService::new(storage);

    match cmd {
        UserCommands::Add { username, admin } => {
            let user = service.register(&username, admin)?;
            println!("Registered user: {}", user.username);
            println!("  Role:  {}", if user.is_admin { "admin" } else { "user" });
            println!("  ID:    {}", user.id);
            println!("  Token: {}", user.api_token);
        }

        UserCommands::List => {
            print!("{}", format_user_list(&service.list()?));
        }

        UserCommands::RotateToken { username } => {
            let user = service.find_by_username(&username)?;
            let user = service.rotate_token(user.id)?;
            println!("New token for {}: {}", user.username, user.api_token);
        }
    }

    Ok(())
}
