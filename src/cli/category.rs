//! Category CLI commands
//!
//! Categories are always addressed within a project.

use clap::Subcommand;

use crate::error::EasyFinanceResult;
use crate::services::{CategoryService, ProjectService};
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List the categories of a project
    List {
        /// Project name or ID
        #[arg(short, long)]
        project: String,
    },

    /// Add a category to a project
    Add {
        /// Category name
        name: String,
        /// Project name or ID
        #[arg(short, long)]
        project: String,
    },

    /// Rename a category
    Rename {
        /// Category name or ID
        category: String,
        /// New name
        name: String,
        /// Project name or ID
        #[arg(short, long)]
        project: String,
    },

    /// Remove a category and its expenses
    Remove {
        /// Category name or ID
        category: String,
        /// Project name or ID
        #[arg(short, long)]
        project: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> EasyFinanceResult<()> {
    let projects = ProjectService::new(storage);
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List { project } => {
            let project = projects.find(&project)?;
            let categories = service.list(project.id())?;

            if categories.is_empty() {
                println!("No categories in {}.", project.name());
                return Ok(());
            }
            for category in categories {
                println!(
                    "  {}  spent {} of {}  ({} expense(s))  {}",
                    category.name(),
                    category.total_spent(),
                    category.total_goal(),
                    category.expenses().len(),
                    category.id().short()
                );
            }
        }

        CategoryCommands::Add { name, project } => {
            let project = projects.find(&project)?;
            let category = service.add(project.id(), &name)?;

            println!("Added category: {}", category.name());
            println!("  Project: {}", project.name());
            println!("  ID: {}", category.id());
        }

        CategoryCommands::Rename {
            category,
            name,
            project,
        } => {
            let project = projects.find(&project)?;
            let category = service.find(project.id(), &category)?;
            let renamed = service.rename(project.id(), category.id(), &name)?;
            println!("Renamed category: {} -> {}", category.name(), renamed.name());
        }

        CategoryCommands::Remove { category, project } => {
            let project = projects.find(&project)?;
            let category = service.find(project.id(), &category)?;
            service.remove(project.id(), category.id())?;
            println!("Removed category: {}", category.name());
        }
    }

    Ok(())
}
