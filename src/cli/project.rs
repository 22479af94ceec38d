//! Project CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_project_details, format_project_list};
use crate::error::{EasyFinanceError, EasyFinanceResult};
use crate::models::ProjectType;
use crate::services::{PatchOperation, ProjectService};
use crate::storage::Storage;

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List all projects
    List,

    /// Create a new project
    Create {
        /// Project name
        name: String,
        /// Project type (personal, family, business, other)
        #[arg(short = 't', long = "type", default_value = "personal")]
        project_type: String,
    },

    /// Show a project with its categories and expenses
    Show {
        /// Project name or ID
        project: String,
    },

    /// Rename a project
    Rename {
        /// Project name or ID
        project: String,
        /// New name
        name: String,
    },

    /// Apply a list of patch operations, e.g.
    /// '[{"op": "replace", "path": "/type", "value": "Business"}]'
    Patch {
        /// Project name or ID
        project: String,
        /// Operations as a JSON array
        #[arg(required_unless_present = "file")]
        operations: Option<String>,
        /// Read the operations from a file instead
        #[arg(short, long, conflicts_with = "operations")]
        file: Option<PathBuf>,
    },

    /// Delete a project and everything in it
    Delete {
        /// Project name or ID
        project: String,
    },
}

/// Handle a project command
pub fn handle_project_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ProjectCommands,
) -> EasyFinanceResult<()> {
    let service = ProjectService::new(storage).with_date_policy(settings.date_policy);

    match cmd {
        ProjectCommands::List => {
            print!("{}", format_project_list(&service.list()?));
        }

        ProjectCommands::Create { name, project_type } => {
            let project_type: ProjectType = project_type
                .parse()
                .map_err(EasyFinanceError::InvalidInput)?;
            let project = service.create(&name, project_type)?;

            println!("Created project: {}", project.name());
            println!("  Type: {}", project.project_type());
            println!("  ID: {}", project.id());
        }

        ProjectCommands::Show { project } => {
            let project = service.find(&project)?;
            print!("{}", format_project_details(&project));
        }

        ProjectCommands::Rename { project, name } => {
            let project = service.find(&project)?;
            let renamed = service.rename(project.id(), &name)?;
            println!("Renamed project: {} -> {}", project.name(), renamed.name());
        }

        ProjectCommands::Patch {
            project,
            operations,
            file,
        } => {
            let raw = match (operations, file) {
                (_, Some(path)) => std::fs::read_to_string(&path).map_err(|e| {
                    EasyFinanceError::Io(format!("Failed to read {}: {}", path.display(), e))
                })?,
                (Some(raw), None) => raw,
                (None, None) => {
                    return Err(EasyFinanceError::InvalidInput(
                        "no patch operations given".into(),
                    ))
                }
            };
            let operations: Vec<PatchOperation> = serde_json::from_str(&raw)
                .map_err(|e| EasyFinanceError::InvalidInput(format!("Invalid patch: {}", e)))?;

            let project = service.find(&project)?;
            let updated = service.update(project.id(), &operations)?;
            println!(
                "Updated project: {} ({} operation(s))",
                updated.name(),
                operations.len()
            );
        }

        ProjectCommands::Delete { project } => {
            let project = service.find(&project)?;
            service.delete(project.id())?;
            println!("Deleted project: {}", project.name());
        }
    }

    Ok(())
}
