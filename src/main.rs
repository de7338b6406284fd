use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mybudget::cli::{handle_audit_command, handle_budget_command, handle_user_command};
use mybudget::config::{MyBudgetPaths, Settings};
use mybudget::services::UserService;
use mybudget::storage::{initialize_storage, needs_initialization, Storage};

#[derive(Parser)]
#[command(
    name = "mybudget",
    version,
    about = "Budget tracking server and administration tool",
    long_about = "MyBudget keeps per-user budgets and their expenses behind a \
                  token-authenticated JSON API. Use 'serve' to run the API and \
                  the other commands to administer users and budgets locally."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Address to bind (overrides config.json)
        #[arg(long, env = "MYBUDGET_HOST")]
        host: Option<String>,
        /// Port to listen on (overrides config.json)
        #[arg(short, long, env = "MYBUDGET_PORT")]
        port: Option<u16>,
    },

    /// Create the data directory and default configuration
    Init {
        /// Also register an admin user with this name
        #[arg(long)]
        admin: Option<String>,
    },

    /// Show current configuration and paths
    Config,

    /// User management commands
    #[command(subcommand)]
    User(mybudget::cli::UserCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(mybudget::cli::BudgetCommands),

    /// Show recent audit log entries
    Audit {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },
}

fn init_logging(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = MyBudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    init_logging(&settings.log_filter);

    // Initialize storage
    let storage = Storage::open(paths.clone())?;

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if needs_initialization(&paths) {
                tracing::warn!(
                    base_dir = %paths.base_dir().display(),
                    "data directory is not initialized; run 'mybudget init --admin <name>' to register an admin"
                );
            }
            let settings = settings.with_overrides(host, port);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(mybudget::api::run_server(Arc::new(storage), &settings))?;
        }
        Some(Commands::Init { admin }) => {
            println!("Initializing MyBudget at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            storage.load_all()?;

            if let Some(name) = admin {
                let user = UserService::new(&storage).register(&name, true)?;
                println!("Registered admin user: {}", user.username);
                println!("  Token: {}", user.api_token);
            }

            println!("Initialization complete!");
            println!();
            println!("Run 'mybudget user add <name>' to register users.");
            println!("Run 'mybudget serve' to start the API.");
        }
        Some(Commands::Config) => {
            println!("MyBudget Configuration");
            println!("======================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data directory: {}", paths.data_dir().display());
            println!("Audit log:      {}", paths.audit_log().display());
            println!(
                "Initialized:    {}",
                if needs_initialization(&paths) { "no" } else { "yes" }
            );
            println!();
            println!("Settings:");
            println!("  Listen address: {}", settings.server.bind_address());
            println!("  CORS enabled:   {}", settings.server.enable_cors);
            println!("  Log filter:     {}", settings.log_filter);
        }
        Some(Commands::User(cmd)) => {
            handle_user_command(&storage, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&storage, cmd)?;
        }
        Some(Commands::Audit { count }) => {
            handle_audit_command(&storage, count)?;
        }
        None => {
            println!("MyBudget - budget tracking server");
            println!();
            println!("Run 'mybudget --help' for usage information.");
            println!("Run 'mybudget serve' to start the API.");
        }
    }

    Ok(())
}
