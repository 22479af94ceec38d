//! Category service
//!
//! Categories live inside their project, so every operation loads the
//! project, changes it and stores it back.

use crate::audit::EntityType;
use crate::error::{EasyFinanceError, EasyFinanceResult};
use crate::models::{Category, CategoryId, ProjectId};
use crate::storage::Storage;

use super::{load_project, store_project};

pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn add(&self, project_id: ProjectId, name: &str) -> EasyFinanceResult<Category> {
        let mut project = load_project(self.storage, project_id)?;

        let mut category = Category::new();
        category
            .set_name(Some(name.trim()))?
            .set_project(Some(project_id))?;

        if !project.add_category(category.clone()) {
            return Err(EasyFinanceError::Duplicate {
                entity_type: "Category",
                identifier: category.name().to_string(),
            });
        }
        store_project(self.storage, &project)?;

        self.storage.log_create(
            EntityType::Category,
            category.id().to_string(),
            Some(category.name().to_string()),
            &category,
        )?;
        tracing::info!(project = %project_id, category = %category.id(), "category added");

        Ok(category)
    }

    pub fn list(&self, project_id: ProjectId) -> EasyFinanceResult<Vec<Category>> {
        Ok(load_project(self.storage, project_id)?.categories().to_vec())
    }

    /// Find a category of a project by name or ID string
    pub fn find(&self, project_id: ProjectId, identifier: &str) -> EasyFinanceResult<Category> {
        let project = load_project(self.storage, project_id)?;

        if let Some(category) = project.category_by_name(identifier) {
            return Ok(category.clone());
        }
        identifier
            .parse::<CategoryId>()
            .ok()
            .and_then(|id| project.category(id).cloned())
            .ok_or_else(|| EasyFinanceError::category_not_found(identifier))
    }

    pub fn rename(
        &self,
        project_id: ProjectId,
        category_id: CategoryId,
        name: &str,
    ) -> EasyFinanceResult<Category> {
        let mut project = load_project(self.storage, project_id)?;
        let name = name.trim();

        if let Some(existing) = project.category_by_name(name) {
            if existing.id() != category_id {
                return Err(EasyFinanceError::Duplicate {
                    entity_type: "Category",
                    identifier: name.to_string(),
                });
            }
        }

        let category = project
            .category_mut(category_id)
            .ok_or_else(|| EasyFinanceError::category_not_found(category_id.to_string()))?;
        let before = category.clone();
        category.set_name(Some(name))?;
        let after = category.clone();

        store_project(self.storage, &project)?;

        self.storage.log_update(
            EntityType::Category,
            after.id().to_string(),
            Some(after.name().to_string()),
            &before,
            &after,
            Some(format!("name: {} -> {}", before.name(), after.name())),
        )?;

        Ok(after)
    }

    /// Remove a category together with its expenses
    pub fn remove(&self, project_id: ProjectId, category_id: CategoryId) -> EasyFinanceResult<Category> {
        let mut project = load_project(self.storage, project_id)?;
        let category = project
            .remove_category(category_id)
            .ok_or_else(|| EasyFinanceError::category_not_found(category_id.to_string()))?;

        store_project(self.storage, &project)?;

        self.storage.log_delete(
            EntityType::Category,
            category.id().to_string(),
            Some(category.name().to_string()),
            &category,
        )?;
        tracing::info!(project = %project_id, category = %category_id, "category removed");

        Ok(category)
    }
}
