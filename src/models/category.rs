//! Category model
//!
//! Categories group the expenses of a project (e.g. "Housing", "Food").

use serde::{Deserialize, Serialize};
use std::fmt;

use super::expense::Expense;
use super::ids::{CategoryId, ExpenseId, ProjectId};
use super::money::Money;
use super::validation::{require_present, require_text, DatePolicy};
use crate::error::ValidationResult;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Category {
    id: CategoryId,
    name: String,
    project_id: Option<ProjectId>,
    #[serde(default)]
    expenses: Vec<Expense>,
}

impl Category {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> CategoryId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_id(&self) -> Option<ProjectId> {
        self.project_id
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn set_name(&mut self, name: Option<&str>) -> ValidationResult<&mut Self> {
        self.name = require_text(name, "Name")?;
        Ok(self)
    }

    pub fn set_project(&mut self, project_id: Option<ProjectId>) -> ValidationResult<&mut Self> {
        self.project_id = Some(require_present(project_id, "Project")?);
        Ok(self)
    }

    pub(crate) fn link_to(&mut self, project_id: ProjectId) {
        self.project_id = Some(project_id);
    }

    pub fn set_expenses(&mut self, expenses: Option<Vec<Expense>>) -> ValidationResult<&mut Self> {
        self.expenses = require_present(expenses, "Expenses")?;
        Ok(self)
    }

    pub fn add_expense(&mut self, expense: Expense) -> &mut Self {
        self.expenses.push(expense);
        self
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id() == id)
    }

    pub fn expense_mut(&mut self, id: ExpenseId) -> Option<&mut Expense> {
        self.expenses.iter_mut().find(|e| e.id() == id)
    }

    pub fn remove_expense(&mut self, id: ExpenseId) -> Option<Expense> {
        let index = self.expenses.iter().position(|e| e.id() == id)?;
        Some(self.expenses.remove(index))
    }

    pub fn total_goal(&self) -> Money {
        self.expenses.iter().map(Expense::goal).sum()
    }

    pub fn total_spent(&self) -> Money {
        self.expenses.iter().map(Expense::amount).sum()
    }

    pub fn validate(&self, policy: &DatePolicy) -> ValidationResult<()> {
        require_text(Some(&self.name), "Name")?;
        require_present(self.project_id, "Project")?;
        for expense in &self.expenses {
            expense.validate(policy)?;
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required() {
        let mut category = Category::new();
        assert_eq!(category.set_name(Some("")).unwrap_err().property(), "Name");
        assert_eq!(category.set_name(None).unwrap_err().property(), "Name");
        category.set_name(Some("Housing")).unwrap();
        assert_eq!(category.to_string(), "Housing");
    }

    #[test]
    fn test_project_required() {
        let mut category = Category::new();
        assert_eq!(category.set_project(None).unwrap_err().property(), "Project");

        let project = ProjectId::new();
        category.set_project(Some(project)).unwrap();
        assert_eq!(category.project_id(), Some(project));
    }

    #[test]
    fn test_expense_totals() {
        let mut category = Category::new();
        for (goal, amount) in [(500, 450), (100, 120)] {
            let mut expense = Expense::new();
            expense.set_goal(Money::from_units(goal)).unwrap();
            expense.set_amount(Money::from_units(amount)).unwrap();
            category.add_expense(expense);
        }

        assert_eq!(category.total_goal(), Money::from_units(600));
        assert_eq!(category.total_spent(), Money::from_units(570));
    }

    #[test]
    fn test_remove_expense() {
        let mut category = Category::new();
        let expense = Expense::new();
        let id = expense.id();
        category.add_expense(expense);

        assert!(category.expense(id).is_some());
        assert!(category.remove_expense(id).is_some());
        assert!(category.expense(id).is_none());
    }
}
