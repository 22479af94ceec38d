//! Builders for projects, categories and incomes

use chrono::{DateTime, Utc};

use super::Draft;
use crate::error::ValidationResult;
use crate::models::{
    Category, DatePolicy, Expense, Income, Money, Project, ProjectId, ProjectType, UserId,
};

#[derive(Debug, Clone)]
pub struct ProjectBuilder {
    draft: Draft<Project>,
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self {
            draft: Draft::new(Project::new()),
        }
    }

    pub fn add_name(mut self, name: Option<&str>) -> Self {
        self.draft = self.draft.apply(|p| p.set_name(name).map(drop));
        self
    }

    pub fn add_type(mut self, project_type: ProjectType) -> Self {
        self.draft = self.draft.apply(|p| {
            p.set_type(project_type);
            Ok(())
        });
        self
    }

    pub fn add_categories(mut self, categories: Option<Vec<Category>>) -> Self {
        self.draft = self.draft.apply(|p| p.set_categories(categories).map(drop));
        self
    }

    pub fn add_incomes(mut self, incomes: Option<Vec<Income>>) -> Self {
        self.draft = self.draft.apply(|p| p.set_incomes(incomes).map(drop));
        self
    }

    pub fn build(self) -> ValidationResult<Project> {
        self.draft.finish()
    }
}

#[derive(Debug, Clone)]
pub struct CategoryBuilder {
    draft: Draft<Category>,
}

impl Default for CategoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryBuilder {
    pub fn new() -> Self {
        Self {
            draft: Draft::new(Category::new()),
        }
    }

    pub fn add_name(mut self, name: Option<&str>) -> Self {
        self.draft = self.draft.apply(|c| c.set_name(name).map(drop));
        self
    }

    pub fn add_project(mut self, project_id: Option<ProjectId>) -> Self {
        self.draft = self.draft.apply(|c| c.set_project(project_id).map(drop));
        self
    }

    pub fn add_expenses(mut self, expenses: Option<Vec<Expense>>) -> Self {
        self.draft = self.draft.apply(|c| c.set_expenses(expenses).map(drop));
        self
    }

    pub fn build(self) -> ValidationResult<Category> {
        self.draft.finish()
    }
}

#[derive(Debug, Clone)]
pub struct IncomeBuilder {
    draft: Draft<Income>,
    policy: DatePolicy,
}

impl Default for IncomeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl IncomeBuilder {
    pub fn new() -> Self {
        Self {
            draft: Draft::new(Income::new()),
            policy: DatePolicy::default(),
        }
    }

    pub fn with_date_policy(mut self, policy: DatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn add_name(mut self, name: Option<&str>) -> Self {
        self.draft = self.draft.apply(|i| i.set_name(name).map(drop));
        self
    }

    pub fn add_amount(mut self, amount: Money) -> Self {
        self.draft = self.draft.apply(|i| i.set_amount(amount).map(drop));
        self
    }

    pub fn add_date(mut self, date: DateTime<Utc>) -> Self {
        let policy = self.policy;
        self.draft = self
            .draft
            .apply(|i| i.set_date_with_policy(date, &policy).map(drop));
        self
    }

    pub fn add_description(mut self, description: &str) -> Self {
        self.draft = self.draft.apply(|i| {
            i.set_description(description);
            Ok(())
        });
        self
    }

    pub fn add_created_by(mut self, user: Option<UserId>) -> Self {
        self.draft = self.draft.apply(|i| i.set_created_by(user).map(drop));
        self
    }

    pub fn build(self) -> ValidationResult<Income> {
        self.draft.finish()
    }
}
