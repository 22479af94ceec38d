//! Project service
//!
//! CRUD for projects plus partial updates through patch-operation lists.
//! Every write goes through the entity setters or `Project::validate`, so an
//! invalid project never reaches storage.

use crate::audit::EntityType;
use crate::error::{EasyFinanceError, EasyFinanceResult};
use crate::models::{DatePolicy, Project, ProjectId, ProjectType};
use crate::storage::{Repository, Storage};

use super::patch::{apply_patch, PatchOperation};

pub struct ProjectService<'a> {
    storage: &'a Storage,
    policy: DatePolicy,
}

impl<'a> ProjectService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self {
            storage,
            policy: DatePolicy::default(),
        }
    }

    pub fn with_date_policy(mut self, policy: DatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn create(&self, name: &str, project_type: ProjectType) -> EasyFinanceResult<Project> {
        let mut project = Project::new();
        project.set_name(Some(name.trim()))?.set_type(project_type);

        if self.find_by_name(project.name())?.is_some() {
            return Err(EasyFinanceError::Duplicate {
                entity_type: "Project",
                identifier: project.name().to_string(),
            });
        }

        self.storage.projects.save(project.clone())?;
        self.storage.projects.flush()?;

        self.storage.log_create(
            EntityType::Project,
            project.id().to_string(),
            Some(project.name().to_string()),
            &project,
        )?;
        tracing::info!(project = %project.id(), name = project.name(), "project created");

        Ok(project)
    }

    pub fn list(&self) -> EasyFinanceResult<Vec<Project>> {
        self.storage.projects.all()
    }

    pub fn get(&self, id: ProjectId) -> EasyFinanceResult<Project> {
        self.storage
            .projects
            .find(id)?
            .ok_or_else(|| EasyFinanceError::project_not_found(id.to_string()))
    }

    /// Case-insensitive name lookup
    pub fn find_by_name(&self, name: &str) -> EasyFinanceResult<Option<Project>> {
        self.storage
            .projects
            .find_by(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// Find a project by name or ID string
    pub fn find(&self, identifier: &str) -> EasyFinanceResult<Project> {
        if let Some(project) = self.find_by_name(identifier)? {
            return Ok(project);
        }

        if let Ok(id) = identifier.parse::<ProjectId>() {
            if let Some(project) = self.storage.projects.find(id)? {
                return Ok(project);
            }
        }

        Err(EasyFinanceError::project_not_found(identifier))
    }

    pub fn rename(&self, id: ProjectId, name: &str) -> EasyFinanceResult<Project> {
        self.update(id, &[PatchOperation::replace("/name", name.trim())])
    }

    /// Apply a patch-operation list and re-validate the result
    ///
    /// The project id cannot be changed. The stored project is untouched if any
    /// operation fails or the patched project is invalid.
    pub fn update(&self, id: ProjectId, operations: &[PatchOperation]) -> EasyFinanceResult<Project> {
        let before = self.get(id)?;

        let mut doc = serde_json::to_value(&before)?;
        apply_patch(&mut doc, operations)?;

        let mut after: Project = serde_json::from_value(doc)
            .map_err(|e| EasyFinanceError::Patch(format!("patched project is malformed: {}", e)))?;
        if after.id() != before.id() {
            return Err(EasyFinanceError::Patch("project id cannot be changed".into()));
        }
        after.link_categories();
        after.validate(&self.policy)?;

        if let Some(other) = self.find_by_name(after.name())? {
            if other.id() != id {
                return Err(EasyFinanceError::Duplicate {
                    entity_type: "Project",
                    identifier: after.name().to_string(),
                });
            }
        }

        self.storage.projects.save(after.clone())?;
        self.storage.projects.flush()?;

        let paths: Vec<&str> = operations.iter().map(PatchOperation::path).collect();
        self.storage.log_update(
            EntityType::Project,
            after.id().to_string(),
            Some(after.name().to_string()),
            &before,
            &after,
            Some(format!("patched {}", paths.join(", "))),
        )?;
        tracing::info!(project = %id, operations = operations.len(), "project updated");

        Ok(after)
    }

    pub fn delete(&self, id: ProjectId) -> EasyFinanceResult<Project> {
        let project = self.get(id)?;

        self.storage.projects.delete(id)?;
        self.storage.projects.flush()?;

        self.storage.log_delete(
            EntityType::Project,
            project.id().to_string(),
            Some(project.name().to_string()),
            &project,
        )?;
        tracing::info!(project = %id, "project deleted");

        Ok(project)
    }
}
