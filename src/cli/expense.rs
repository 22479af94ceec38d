//! Expense CLI commands
//!
//! Implements CLI commands for expenses and their items. New entities are
//! assembled with the builders, so the first invalid field is reported.

use clap::{Args, Subcommand};

use super::{parse_date, parse_money, resolve_user};
use crate::builders::{ExpenseBuilder, ExpenseItemBuilder};
use crate::config::Settings;
use crate::display::format_expense_summary;
use crate::error::EasyFinanceResult;
use crate::models::{Category, Money, Project};
use crate::services::{CategoryService, ExpenseService, ProjectService};
use crate::storage::Storage;

/// Project and category an expense lives in
#[derive(Args)]
pub struct ExpenseLocation {
    /// Project name or ID
    #[arg(short, long)]
    project: String,
    /// Category name or ID
    #[arg(short, long)]
    category: String,
}

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Goal versus spent for every expense of a project
    List {
        /// Project name or ID
        #[arg(short, long)]
        project: String,
    },

    /// Add an expense to a category
    Add {
        /// Expense name
        name: String,
        #[command(flatten)]
        location: ExpenseLocation,
        /// Amount planned (e.g., "500" or "500.00")
        #[arg(short, long, default_value = "0")]
        goal: String,
        /// Amount spent so far
        #[arg(short, long, default_value = "0")]
        amount: String,
        /// Date (YYYY-MM-DD, defaults to now)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Change the amount or goal of an expense
    Update {
        /// Expense name or ID
        expense: String,
        #[command(flatten)]
        location: ExpenseLocation,
        /// New amount spent
        #[arg(short, long)]
        amount: Option<String>,
        /// New goal
        #[arg(short, long)]
        goal: Option<String>,
    },

    /// Add an item to an expense
    #[command(name = "add-item")]
    AddItem {
        /// Expense name or ID
        expense: String,
        /// Item name
        name: String,
        #[command(flatten)]
        location: ExpenseLocation,
        /// Item amount
        #[arg(short, long, default_value = "0")]
        amount: String,
        /// Date (YYYY-MM-DD, defaults to now)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Remove an expense
    Remove {
        /// Expense name or ID
        expense: String,
        #[command(flatten)]
        location: ExpenseLocation,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    user: Option<&str>,
    cmd: ExpenseCommands,
) -> EasyFinanceResult<()> {
    let service = ExpenseService::new(storage).with_date_policy(settings.date_policy);

    match cmd {
        ExpenseCommands::List { project } => {
            let project = ProjectService::new(storage).find(&project)?;
            print!("{}", format_expense_summary(&service.summary(project.id())?));
        }

        ExpenseCommands::Add {
            name,
            location,
            goal,
            amount,
            date,
        } => {
            let (project, category) = locate(storage, &location)?;
            let expense = ExpenseBuilder::new()
                .with_date_policy(settings.date_policy)
                .add_name(Some(&name))
                .add_goal(parse_money(&goal, "goal")?)
                .add_amount(parse_money(&amount, "amount")?)
                .add_date(parse_date(date.as_deref())?)
                .add_created_by(resolve_user(storage, settings, user)?)
                .build()?;

            let expense = service.add(project.id(), category.id(), expense)?;
            println!("Added expense: {}", expense.name());
            println!("  Category: {}", category.name());
            println!("  Goal: {}  Spent: {}", expense.goal(), expense.amount());
            println!("  ID: {}", expense.id());
        }

        ExpenseCommands::Update {
            expense,
            location,
            amount,
            goal,
        } => {
            if amount.is_none() && goal.is_none() {
                println!("No changes specified. Use --amount or --goal.");
                return Ok(());
            }

            let (project, category) = locate(storage, &location)?;
            let expense = service.find(project.id(), category.id(), &expense)?;

            let amount: Option<Money> = amount.map(|a| parse_money(&a, "amount")).transpose()?;
            let goal: Option<Money> = goal.map(|g| parse_money(&g, "goal")).transpose()?;

            let mut updated = expense;
            if let Some(amount) = amount {
                updated = service.set_amount(project.id(), category.id(), updated.id(), amount)?;
            }
            if let Some(goal) = goal {
                updated = service.set_goal(project.id(), category.id(), updated.id(), goal)?;
            }

            println!(
                "Updated expense: {}  Goal: {}  Spent: {}",
                updated.name(),
                updated.goal(),
                updated.amount()
            );
            if updated.is_over_goal() {
                println!("  Over goal by {}", -updated.remaining());
            }
        }

        ExpenseCommands::AddItem {
            expense,
            name,
            location,
            amount,
            date,
        } => {
            let (project, category) = locate(storage, &location)?;
            let expense = service.find(project.id(), category.id(), &expense)?;
            let item = ExpenseItemBuilder::new()
                .with_date_policy(settings.date_policy)
                .add_name(Some(&name))
                .add_amount(parse_money(&amount, "amount")?)
                .add_date(parse_date(date.as_deref())?)
                .add_created_by(resolve_user(storage, settings, user)?)
                .build()?;

            let updated = service.add_item(project.id(), category.id(), expense.id(), item)?;
            println!(
                "Added item '{}' to {} ({} item(s))",
                name,
                updated.name(),
                updated.items().len()
            );
        }

        ExpenseCommands::Remove { expense, location } => {
            let (project, category) = locate(storage, &location)?;
            let expense = service.find(project.id(), category.id(), &expense)?;
            service.remove(project.id(), category.id(), expense.id())?;
            println!("Removed expense: {}", expense.name());
        }
    }

    Ok(())
}

fn locate(storage: &Storage, location: &ExpenseLocation) -> EasyFinanceResult<(Project, Category)> {
    let project = ProjectService::new(storage).find(&location.project)?;
    let category = CategoryService::new(storage).find(project.id(), &location.category)?;
    Ok((project, category))
}
