//! Service layer for EasyFinance
//!
//! The service layer provides business logic on top of the storage layer:
//! lookups by name or id, duplicate checks, re-validation of patched
//! entities, password hashing and audit logging.

pub mod account;
pub mod category;
pub mod expense;
pub mod income;
pub mod patch;
pub mod project;

pub use account::{AccountService, DeletionOutcome};
pub use category::CategoryService;
pub use expense::{ExpenseService, ExpenseSummary};
pub use income::IncomeService;
pub use patch::{apply_patch, PatchOperation};
pub use project::ProjectService;

use crate::error::{EasyFinanceError, EasyFinanceResult};
use crate::models::{Project, ProjectId};
use crate::storage::{Repository, Storage};

pub(crate) fn load_project(storage: &Storage, id: ProjectId) -> EasyFinanceResult<Project> {
    storage
        .projects
        .find(id)?
        .ok_or_else(|| EasyFinanceError::project_not_found(id.to_string()))
}

pub(crate) fn store_project(storage: &Storage, project: &Project) -> EasyFinanceResult<()> {
    storage.projects.save(project.clone())?;
    storage.projects.flush()
}
