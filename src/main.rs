use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use expense_tracker::cli::Session;
use expense_tracker::config::{paths::DATA_DIR_ENV, Settings, TrackerPaths};
use expense_tracker::storage::{initialize_storage, Storage};

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Household expense tracker",
    long_about = "Log family expenses to a shared CSV ledger, review spending \
                  trends and monthly reports, check category budgets and keep \
                  timestamped backups of the ledger."
)]
struct Cli {
    /// Directory holding expenses.csv, budget.csv and backups
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive menu (default)
    Menu,

    /// Create the ledger and budget table if they are missing
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    expense_tracker::utils::init_tracing();

    let cli = Cli::parse();

    let paths = match cli.data_dir {
        Some(dir) => TrackerPaths::with_base_dir(dir),
        None => TrackerPaths::new().context("Failed to resolve data directory")?,
    };

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing expense tracker at: {}", paths.base_dir().display());
            initialize_storage(&paths)?;
            Settings::load_or_create(&paths)?.save(&paths)?;
            println!("Initialization complete!");
            println!("  Ledger:       {}", paths.ledger_file().display());
            println!("  Budget table: {}", paths.budget_file().display());
        }
        Some(Commands::Config) => {
            let settings = Settings::load_or_create(&paths)?;
            println!("Expense Tracker Configuration");
            println!("=============================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Ledger:           {}", paths.ledger_file().display());
            println!("Budget table:     {}", paths.budget_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Chart width:     {}", settings.chart_width);
        }
        Some(Commands::Menu) | None => {
            let storage = Storage::new(paths);
            if !storage.is_initialized() {
                info!(
                    dir = %storage.paths().base_dir().display(),
                    "creating ledger and budget table"
                );
                initialize_storage(storage.paths())?;
            }
            let settings = Settings::load_or_create(storage.paths())?;

            let stdin = io::stdin();
            let mut session = Session::new(storage, settings, stdin.lock(), io::stdout());
            session.run().context("Lost connection to the terminal")?;
        }
    }

    Ok(())
}
