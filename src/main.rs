//! Telebill CLI - interactive telecom billing console

use clap::Parser;
use std::io;
use std::path::PathBuf;
use telebill::config;
use telebill::{BillingStore, Console};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "telebill")]
#[command(version)]
#[command(about = "Telecom billing console - customers, usage and invoices on SQLite")]
#[command(long_about = r#"
Telebill opens a numbered menu on the terminal:
  1) Initialize DB     5) List Customers
  2) Add Customer      6) List Invoices
  3) Record Usage      7) Mark Invoice Paid
  4) Generate Invoice  8) Database Statistics
  0) Exit

Example usage:
  telebill --init
  telebill --database ./data/billing.db
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to the database file (overrides the config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Create missing tables before showing the menu
    #[arg(long)]
    init: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();

    let file_config = config::load_config(cli.config.as_deref())?;
    let database = config::resolve_database_path(cli.database.as_deref(), file_config.as_ref());
    config::ensure_db_dir(&database)?;
    tracing::info!("using database {}", database.display());

    let init_on_start = cli.init || file_config.as_ref().is_some_and(|c| c.init_on_start);

    let store = BillingStore::open(&database);
    let mut console = Console::new(store, io::stdin().lock(), io::stdout(), io::stderr());
    if init_on_start {
        console.init_database()?;
    }
    console.run()?;

    Ok(())
}
