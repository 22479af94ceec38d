use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use easyfinance::cli::{
    handle_account_command, handle_category_command, handle_expense_command,
    handle_income_command, handle_project_command, AccountCommands, CategoryCommands,
    ExpenseCommands, IncomeCommands, ProjectCommands,
};
use easyfinance::config::{EasyFinancePaths, Settings};
use easyfinance::storage::Storage;

#[derive(Parser)]
#[command(
    name = "easyfinance",
    version,
    about = "Personal and family finance tracking",
    long_about = "EasyFinance tracks projects, the categories of expenses in them and \
                  the incomes that fund them. Every value is validated before it is \
                  stored, so an invalid amount or date is reported instead of saved."
)]
struct Cli {
    /// Email of the acting user
    #[arg(short, long, global = true, env = "EASYFINANCE_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Project management commands
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Expense management commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Income management commands
    #[command(subcommand)]
    Income(IncomeCommands),

    /// User account commands
    #[command(subcommand)]
    Account(AccountCommands),

    /// Show recent changes from the audit log
    History {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("EASYFINANCE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = EasyFinancePaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let storage = Storage::new(paths.clone())?;
    storage.load_all()?;
    tracing::debug!(base_dir = %paths.base_dir().display(), "storage loaded");

    let user = cli.user.as_deref();

    match cli.command {
        Some(Commands::Project(cmd)) => handle_project_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, user, cmd)?,
        Some(Commands::Income(cmd)) => handle_income_command(&storage, &settings, user, cmd)?,
        Some(Commands::Account(cmd)) => handle_account_command(&storage, &settings, user, cmd)?,
        Some(Commands::History { limit }) => {
            let entries = storage.audit().read_recent(limit)?;
            if entries.is_empty() {
                println!("No changes recorded yet.");
            }
            for entry in entries {
                println!("{}", entry.format_human_readable());
            }
        }
        Some(Commands::Config) => {
            println!("EasyFinance Configuration");
            println!("=========================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Data directory:  {}", paths.data_dir().display());
            println!("Audit log:       {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Default currency:        {}", settings.default_currency);
            println!("  Date format:             {}", settings.date_format);
            println!(
                "  Max years in the past:   {}",
                settings.date_policy.max_years_in_past
            );
            println!(
                "  Deletion token lifetime: {} minutes",
                settings.deletion_token_ttl_minutes
            );
        }
        None => {
            println!("EasyFinance - personal and family finance tracking");
            println!();
            println!("Run 'easyfinance --help' for usage information.");
        }
    }

    Ok(())
}
