//! Income CLI commands

use clap::Subcommand;

use super::{parse_date, parse_money, resolve_user};
use crate::builders::IncomeBuilder;
use crate::config::Settings;
use crate::display::format_income_list;
use crate::error::EasyFinanceResult;
use crate::services::{IncomeService, ProjectService};
use crate::storage::Storage;

/// Income subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// List the incomes of a project, most recent first
    List {
        /// Project name or ID
        #[arg(short, long)]
        project: String,
    },

    /// Record an income
    Add {
        /// Income name
        name: String,
        /// Amount received (e.g., "5000" or "5000.00")
        amount: String,
        /// Project name or ID
        #[arg(short, long)]
        project: String,
        /// Date (YYYY-MM-DD, defaults to now)
        #[arg(short, long)]
        date: Option<String>,
        /// Free-form description
        #[arg(long)]
        description: Option<String>,
    },

    /// Remove an income
    Remove {
        /// Income name or ID
        income: String,
        /// Project name or ID
        #[arg(short, long)]
        project: String,
    },
}

/// Handle an income command
pub fn handle_income_command(
    storage: &Storage,
    settings: &Settings,
    user: Option<&str>,
    cmd: IncomeCommands,
) -> EasyFinanceResult<()> {
    let projects = ProjectService::new(storage);
    let service = IncomeService::new(storage).with_date_policy(settings.date_policy);

    match cmd {
        IncomeCommands::List { project } => {
            let project = projects.find(&project)?;
            print!(
                "{}",
                format_income_list(&service.list(project.id())?, &settings.date_format)
            );
        }

        IncomeCommands::Add {
            name,
            amount,
            project,
            date,
            description,
        } => {
            let project = projects.find(&project)?;
            let income = IncomeBuilder::new()
                .with_date_policy(settings.date_policy)
                .add_name(Some(&name))
                .add_amount(parse_money(&amount, "amount")?)
                .add_date(parse_date(date.as_deref())?)
                .add_description(description.as_deref().unwrap_or_default())
                .add_created_by(resolve_user(storage, settings, user)?)
                .build()?;

            let income = service.add(project.id(), income)?;
            println!("Added income: {} ({})", income.name(), income.amount());
            println!("  Project total: {}", service.total(project.id())?);
        }

        IncomeCommands::Remove { income, project } => {
            let project = projects.find(&project)?;
            let target = service.find(project.id(), &income)?;
            service.remove(project.id(), target.id())?;
            println!("Removed income: {} ({})", target.name(), target.amount());
        }
    }

    Ok(())
}
