//! Income service

use crate::audit::EntityType;
use crate::error::{EasyFinanceError, EasyFinanceResult};
use crate::models::{DatePolicy, Income, IncomeId, Money, ProjectId};
use crate::storage::Storage;

use super::{load_project, store_project};

pub struct IncomeService<'a> {
    storage: &'a Storage,
    policy: DatePolicy,
}

impl<'a> IncomeService<'a> {
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

    pub fn add(&self, project_id: ProjectId, income: Income) -> EasyFinanceResult<Income> {
        income.validate(&self.policy)?;

        let mut project = load_project(self.storage, project_id)?;
        project.add_income(income.clone());
        store_project(self.storage, &project)?;

        self.storage.log_create(
            EntityType::Income,
            income.id().to_string(),
            Some(income.name().to_string()),
            &income,
        )?;
        tracing::info!(project = %project_id, income = %income.id(), amount = %income.amount(), "income added");

        Ok(income)
    }

    /// Incomes of a project, most recent first
    pub fn list(&self, project_id: ProjectId) -> EasyFinanceResult<Vec<Income>> {
        let mut incomes = load_project(self.storage, project_id)?.incomes().to_vec();
        incomes.sort_by(|a, b| b.date().cmp(&a.date()));
        Ok(incomes)
    }

    /// Find an income of a project by name or ID string
    pub fn find(&self, project_id: ProjectId, identifier: &str) -> EasyFinanceResult<Income> {
        let incomes = self.list(project_id)?;
        let by_id = identifier.parse::<IncomeId>().ok();

        incomes
            .iter()
            .find(|i| i.name().eq_ignore_ascii_case(identifier))
            .or_else(|| by_id.and_then(|id| incomes.iter().find(|i| i.id() == id)))
            .cloned()
            .ok_or_else(|| EasyFinanceError::income_not_found(identifier))
    }

    pub fn total(&self, project_id: ProjectId) -> EasyFinanceResult<Money> {
        Ok(load_project(self.storage, project_id)?.total_income())
    }

    pub fn remove(&self, project_id: ProjectId, income_id: IncomeId) -> EasyFinanceResult<Income> {
        let mut project = load_project(self.storage, project_id)?;
        let income = project
            .remove_income(income_id)
            .ok_or_else(|| EasyFinanceError::income_not_found(income_id.to_string()))?;

        store_project(self.storage, &project)?;

        self.storage.log_delete(
            EntityType::Income,
            income.id().to_string(),
            Some(income.name().to_string()),
            &income,
        )?;

        Ok(income)
    }
}
