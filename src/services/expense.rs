//! Expense service
//!
//! Expenses belong to a category of a project. Entities arrive already
//! built (see `builders`) and are re-validated against the configured date
//! policy before they are stored.

use crate::audit::EntityType;
use crate::error::{EasyFinanceError, EasyFinanceResult};
use crate::models::{
    Category, CategoryId, DatePolicy, Expense, ExpenseId, ExpenseItem, ExpenseItemId, Money,
    Project, ProjectId,
};
use crate::storage::Storage;

use super::{load_project, store_project};

/// One row of the goal-versus-spent overview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseSummary {
    pub category_id: CategoryId,
    pub category: String,
    pub expense_id: ExpenseId,
    pub name: String,
    pub goal: Money,
    pub amount: Money,
    pub item_count: usize,
}

impl ExpenseSummary {
    pub fn remaining(&self) -> Money {
        self.goal - self.amount
    }

    pub fn is_over_goal(&self) -> bool {
        self.amount > self.goal
    }
}

pub struct ExpenseService<'a> {
    storage: &'a Storage,
    policy: DatePolicy,
}

impl<'a> ExpenseService<'a> {
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

    pub fn add(
        &self,
        project_id: ProjectId,
        category_id: CategoryId,
        expense: Expense,
    ) -> EasyFinanceResult<Expense> {
        expense.validate(&self.policy)?;

        let mut project = load_project(self.storage, project_id)?;
        let category = project
            .category_mut(category_id)
            .ok_or_else(|| EasyFinanceError::category_not_found(category_id.to_string()))?;

        if category
            .expenses()
            .iter()
            .any(|e| e.name().eq_ignore_ascii_case(expense.name()))
        {
            return Err(EasyFinanceError::Duplicate {
                entity_type: "Expense",
                identifier: expense.name().to_string(),
            });
        }
        category.add_expense(expense.clone());
        store_project(self.storage, &project)?;

        self.storage.log_create(
            EntityType::Expense,
            expense.id().to_string(),
            Some(expense.name().to_string()),
            &expense,
        )?;
        tracing::info!(
            category = %category_id,
            expense = %expense.id(),
            goal = %expense.goal(),
            amount = %expense.amount(),
            "expense added"
        );

        Ok(expense)
    }

    pub fn list(&self, project_id: ProjectId, category_id: CategoryId) -> EasyFinanceResult<Vec<Expense>> {
        let project = load_project(self.storage, project_id)?;
        project
            .category(category_id)
            .map(|c| c.expenses().to_vec())
            .ok_or_else(|| EasyFinanceError::category_not_found(category_id.to_string()))
    }

    /// Find an expense of a category by name or ID string
    pub fn find(
        &self,
        project_id: ProjectId,
        category_id: CategoryId,
        identifier: &str,
    ) -> EasyFinanceResult<Expense> {
        let expenses = self.list(project_id, category_id)?;
        let by_id = identifier.parse::<ExpenseId>().ok();

        expenses
            .iter()
            .find(|e| e.name().eq_ignore_ascii_case(identifier))
            .or_else(|| by_id.and_then(|id| expenses.iter().find(|e| e.id() == id)))
            .cloned()
            .ok_or_else(|| EasyFinanceError::expense_not_found(identifier))
    }

    /// Goal versus spent for every expense of a project
    pub fn summary(&self, project_id: ProjectId) -> EasyFinanceResult<Vec<ExpenseSummary>> {
        let project = load_project(self.storage, project_id)?;

        Ok(project
            .categories()
            .iter()
            .flat_map(|category| {
                category.expenses().iter().map(move |expense| ExpenseSummary {
                    category_id: category.id(),
                    category: category.name().to_string(),
                    expense_id: expense.id(),
                    name: expense.name().to_string(),
                    goal: expense.goal(),
                    amount: expense.amount(),
                    item_count: expense.items().len(),
                })
            })
            .collect())
    }

    pub fn set_amount(
        &self,
        project_id: ProjectId,
        category_id: CategoryId,
        expense_id: ExpenseId,
        amount: Money,
    ) -> EasyFinanceResult<Expense> {
        self.modify(project_id, category_id, expense_id, |expense| {
            expense.set_amount(amount)?;
            Ok(format!("amount: {}", amount))
        })
    }

    pub fn set_goal(
        &self,
        project_id: ProjectId,
        category_id: CategoryId,
        expense_id: ExpenseId,
        goal: Money,
    ) -> EasyFinanceResult<Expense> {
        self.modify(project_id, category_id, expense_id, |expense| {
            expense.set_goal(goal)?;
            Ok(format!("goal: {}", goal))
        })
    }

    pub fn add_item(
        &self,
        project_id: ProjectId,
        category_id: CategoryId,
        expense_id: ExpenseId,
        item: ExpenseItem,
    ) -> EasyFinanceResult<Expense> {
        item.validate(&self.policy)?;

        let expense = self.modify(project_id, category_id, expense_id, |expense| {
            expense.add_item(item.clone());
            Ok(format!("item added: {}", item.name()))
        })?;

        self.storage.log_create(
            EntityType::ExpenseItem,
            item.id().to_string(),
            Some(item.name().to_string()),
            &item,
        )?;

        Ok(expense)
    }

    pub fn remove_item(
        &self,
        project_id: ProjectId,
        category_id: CategoryId,
        expense_id: ExpenseId,
        item_id: ExpenseItemId,
    ) -> EasyFinanceResult<Expense> {
        let mut removed = None;
        let expense = self.modify(project_id, category_id, expense_id, |expense| {
            let item = expense.remove_item(item_id).ok_or_else(|| EasyFinanceError::NotFound {
                entity_type: "ExpenseItem",
                identifier: item_id.to_string(),
            })?;
            let summary = format!("item removed: {}", item.name());
            removed = Some(item);
            Ok(summary)
        })?;

        if let Some(item) = removed {
            self.storage.log_delete(
                EntityType::ExpenseItem,
                item.id().to_string(),
                Some(item.name().to_string()),
                &item,
            )?;
        }

        Ok(expense)
    }

    pub fn remove(
        &self,
        project_id: ProjectId,
        category_id: CategoryId,
        expense_id: ExpenseId,
    ) -> EasyFinanceResult<Expense> {
        let mut project = load_project(self.storage, project_id)?;
        let expense = category_in(&mut project, category_id)?
            .remove_expense(expense_id)
            .ok_or_else(|| EasyFinanceError::expense_not_found(expense_id.to_string()))?;

        store_project(self.storage, &project)?;

        self.storage.log_delete(
            EntityType::Expense,
            expense.id().to_string(),
            Some(expense.name().to_string()),
            &expense,
        )?;
        tracing::info!(category = %category_id, expense = %expense_id, "expense removed");

        Ok(expense)
    }

    /// Run `change` on a stored expense and persist it if it succeeds
    fn modify<F>(
        &self,
        project_id: ProjectId,
        category_id: CategoryId,
        expense_id: ExpenseId,
        change: F,
    ) -> EasyFinanceResult<Expense>
    where
        F: FnOnce(&mut Expense) -> EasyFinanceResult<String>,
    {
        let mut project = load_project(self.storage, project_id)?;
        let expense = category_in(&mut project, category_id)?
            .expense_mut(expense_id)
            .ok_or_else(|| EasyFinanceError::expense_not_found(expense_id.to_string()))?;

        let before = expense.clone();
        let summary = change(expense)?;
        let after = expense.clone();

        store_project(self.storage, &project)?;

        self.storage.log_update(
            EntityType::Expense,
            after.id().to_string(),
            Some(after.name().to_string()),
            &before,
            &after,
            Some(summary),
        )?;
        tracing::info!(expense = %expense_id, "expense updated");

        Ok(after)
    }
}

fn category_in(
    project: &mut Project,
    category_id: CategoryId,
) -> EasyFinanceResult<&mut Category> {
    project
        .category_mut(category_id)
        .ok_or_else(|| EasyFinanceError::category_not_found(category_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{ExpenseBuilder, ExpenseItemBuilder};
    use crate::models::{ProjectType, UserId};
    use crate::services::test_support::create_test_storage;
    use crate::services::{CategoryService, ProjectService};
    use chrono::{Duration, Utc};

    fn setup(storage: &Storage) -> (ProjectId, CategoryId) {
        let project = ProjectService::new(storage)
            .create("Home", ProjectType::Family)
            .unwrap();
        let category = CategoryService::new(storage)
            .add(project.id(), "Housing")
            .unwrap();
        (project.id(), category.id())
    }

    fn rent(goal: i64, amount: i64) -> Expense {
        ExpenseBuilder::new()
            .add_name(Some("Rent"))
            .add_goal(Money::from_units(goal))
            .add_amount(Money::from_units(amount))
            .add_date(Utc::now() - Duration::days(1))
            .add_created_by(Some(UserId::new()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_add_and_summary() {
        let (_temp_dir, storage) = create_test_storage();
        let (project_id, category_id) = setup(&storage);
        let service = ExpenseService::new(&storage);

        service.add(project_id, category_id, rent(500, 450)).unwrap();

        let rows = service.summary(project_id).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category, "Housing");
        assert_eq!(rows[0].remaining(), Money::from_units(50));
        assert!(!rows[0].is_over_goal());
    }

    #[test]
    fn test_add_requires_created_by() {
        let (_temp_dir, storage) = create_test_storage();
        let (project_id, category_id) = setup(&storage);
        let service = ExpenseService::new(&storage);

        let mut expense = Expense::new();
        expense.set_name(Some("Rent")).unwrap();
        let err = service.add(project_id, category_id, expense).unwrap_err();
        assert_eq!(err.property(), Some("CreatedBy"));
        assert!(service.list(project_id, category_id).unwrap().is_empty());
    }

    #[test]
    fn test_add_honours_date_policy() {
        let (_temp_dir, storage) = create_test_storage();
        let (project_id, category_id) = setup(&storage);

        let mut expense = rent(100, 10);
        expense.set_date(Utc::now() - Duration::days(3 * 366)).unwrap();

        let strict = ExpenseService::new(&storage).with_date_policy(DatePolicy::new(2));
        let err = strict.add(project_id, category_id, expense.clone()).unwrap_err();
        assert_eq!(err.property(), Some("Date"));

        ExpenseService::new(&storage)
            .add(project_id, category_id, expense)
            .unwrap();
    }

    #[test]
    fn test_negative_amount_rejected_on_update() {
        let (_temp_dir, storage) = create_test_storage();
        let (project_id, category_id) = setup(&storage);
        let service = ExpenseService::new(&storage);
        let expense = service.add(project_id, category_id, rent(500, 450)).unwrap();

        let err = service
            .set_amount(project_id, category_id, expense.id(), Money::from_units(-1))
            .unwrap_err();
        assert_eq!(err.property(), Some("Amount"));

        let stored = service.find(project_id, category_id, "rent").unwrap();
        assert_eq!(stored.amount(), Money::from_units(450));

        let updated = service
            .set_goal(project_id, category_id, expense.id(), Money::from_units(400))
            .unwrap();
        assert!(updated.is_over_goal());
    }

    #[test]
    fn test_items() {
        let (_temp_dir, storage) = create_test_storage();
        let (project_id, category_id) = setup(&storage);
        let service = ExpenseService::new(&storage);
        let expense = service.add(project_id, category_id, rent(500, 450)).unwrap();

        let item = ExpenseItemBuilder::new()
            .add_name(Some("Deposit"))
            .add_amount(Money::from_units(50))
            .add_created_by(Some(UserId::new()))
            .build()
            .unwrap();
        let item_id = item.id();

        let updated = service
            .add_item(project_id, category_id, expense.id(), item)
            .unwrap();
        assert_eq!(updated.items().len(), 1);

        let updated = service
            .remove_item(project_id, category_id, expense.id(), item_id)
            .unwrap();
        assert!(updated.items().is_empty());

        let err = service
            .remove_item(project_id, category_id, expense.id(), item_id)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remove() {
        let (_temp_dir, storage) = create_test_storage();
        let (project_id, category_id) = setup(&storage);
        let service = ExpenseService::new(&storage);
        let expense = service.add(project_id, category_id, rent(500, 450)).unwrap();

        service.remove(project_id, category_id, expense.id()).unwrap();
        assert!(service
            .find(project_id, category_id, "Rent")
            .unwrap_err()
            .is_not_found());
    }
}
