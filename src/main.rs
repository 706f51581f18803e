use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budget_engine::cli::{handle_budget_command, handle_category_command, App};
use budget_engine::config::{BudgetPaths, Settings};

#[derive(Parser)]
#[command(
    name = "budget",
    author = "Kaylee Beyene",
    version,
    about = "Monthly budget allocation from the command line",
    long_about = "Allocate money to categories month by month, record spending, \
                  and see how much is left to allocate once recurring bills, \
                  debt payments and savings goals are accounted for."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Budget(budget_engine::cli::BudgetCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(budget_engine::cli::CategoryCommands),

    /// Show current configuration and paths
    Config,
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    init_tracing(&settings);

    match cli.command {
        Some(Commands::Budget(cmd)) => {
            let app = App::open(paths, settings).await?;
            handle_budget_command(&app, cmd).await?;
        }
        Some(Commands::Category(cmd)) => {
            let app = App::open(paths, settings).await?;
            handle_category_command(&app, cmd).await?;
        }
        Some(Commands::Config) => {
            println!("Budget Engine Configuration");
            println!("===========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Budget file:    {}", paths.budget_file().display());
            println!("Signals file:   {}", paths.signals_file().display());
            println!();
            println!("Settings:");
            println!("  Currency symbol:       {}", settings.currency_symbol);
            println!("  Log filter:            {}", settings.log_filter);
            println!("  Copy-forward lookback: {} months", settings.copy_forward_lookback);
            println!("  Seed default categories: {}", settings.seed_default_categories);
        }
        None => {
            println!("budget - monthly budget allocation");
            println!();
            println!("Run 'budget --help' for usage information.");
            println!("Run 'budget overview' to see this month's budget.");
        }
    }

    Ok(())
}
