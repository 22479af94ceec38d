//! Project model
//!
//! A project is the root of the ownership tree: it owns its categories (and
//! through them every expense) and its incomes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::category::Category;
use super::ids::{CategoryId, IncomeId, ProjectId};
use super::income::Income;
use super::money::Money;
use super::validation::{require_present, require_text, DatePolicy};
use crate::error::{ValidationError, ValidationKind, ValidationResult};

/// What a project is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProjectType {
    #[default]
    Personal,
    Family,
    Business,
    Other,
}

impl ProjectType {
    pub fn all() -> &'static [Self] {
        &[Self::Personal, Self::Family, Self::Business, Self::Other]
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Personal => write!(f, "Personal"),
            Self::Family => write!(f, "Family"),
            Self::Business => write!(f, "Business"),
            Self::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown project type: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    name: String,
    #[serde(rename = "type", default)]
    project_type: ProjectType,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    incomes: Vec<Income>,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn incomes(&self) -> &[Income] {
        &self.incomes
    }

    pub fn set_name(&mut self, name: Option<&str>) -> ValidationResult<&mut Self> {
        self.name = require_text(name, "Name")?;
        Ok(self)
    }

    pub fn set_type(&mut self, project_type: ProjectType) -> &mut Self {
        self.project_type = project_type;
        self
    }

    /// Replace the categories
    ///
    /// Fails on duplicate names (case-insensitive) and on categories already
    /// linked to a different project. Unlinked categories are stored as given.
    pub fn set_categories(
        &mut self,
        categories: Option<Vec<Category>>,
    ) -> ValidationResult<&mut Self> {
        let categories = require_present(categories, "Categories")?;
        self.check_categories(&categories)?;
        self.categories = categories;
        Ok(self)
    }

    pub fn set_incomes(&mut self, incomes: Option<Vec<Income>>) -> ValidationResult<&mut Self> {
        self.incomes = require_present(incomes, "Incomes")?;
        Ok(self)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id() == id)
    }

    pub fn category_mut(&mut self, id: CategoryId) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id() == id)
    }

    /// Case-insensitive lookup
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Add a category, linking it to this project
    ///
    /// Categories are a set keyed by name: returns `false` and leaves the
    /// project untouched when one with the same name already exists.
    pub fn add_category(&mut self, mut category: Category) -> bool {
        if self.category_by_name(category.name()).is_some() {
            return false;
        }
        category.link_to(self.id);
        self.categories.push(category);
        true
    }

    /// Link every category without a project to this one
    pub(crate) fn link_categories(&mut self) {
        let id = self.id;
        for category in self.categories.iter_mut().filter(|c| c.project_id().is_none()) {
            category.link_to(id);
        }
    }

    pub fn remove_category(&mut self, id: CategoryId) -> Option<Category> {
        let index = self.categories.iter().position(|c| c.id() == id)?;
        Some(self.categories.remove(index))
    }

    pub fn add_income(&mut self, income: Income) -> &mut Self {
        self.incomes.push(income);
        self
    }

    pub fn remove_income(&mut self, id: IncomeId) -> Option<Income> {
        let index = self.incomes.iter().position(|i| i.id() == id)?;
        Some(self.incomes.remove(index))
    }

    pub fn total_income(&self) -> Money {
        self.incomes.iter().map(Income::amount).sum()
    }

    pub fn total_spent(&self) -> Money {
        self.categories.iter().map(Category::total_spent).sum()
    }

    /// Income minus spending
    pub fn balance(&self) -> Money {
        self.total_income() - self.total_spent()
    }

    fn check_categories(&self, categories: &[Category]) -> ValidationResult<()> {
        for (index, category) in categories.iter().enumerate() {
            if category.project_id().is_some_and(|owner| owner != self.id) {
                return Err(ValidationError::new(ValidationKind::ForeignOwner, "Categories"));
            }
            if categories[..index]
                .iter()
                .any(|c| c.name().eq_ignore_ascii_case(category.name()))
            {
                return Err(ValidationError::new(ValidationKind::DuplicateName, "Categories"));
            }
        }
        Ok(())
    }

    pub fn validate(&self, policy: &DatePolicy) -> ValidationResult<()> {
        require_text(Some(&self.name), "Name")?;
        self.check_categories(&self.categories)?;
        for category in &self.categories {
            category.validate(policy)?;
        }
        for income in &self.incomes {
            income.validate(policy)?;
        }
        Ok(())
    }
}

impl fmt::Display for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_category(name: &str) -> Category {
        let mut category = Category::new();
        category.set_name(Some(name)).unwrap();
        category
    }

    #[test]
    fn test_name_required() {
        let mut project = Project::new();
        let err = project.set_name(Some("")).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::PropertyCantBeNullOrEmpty);
        assert_eq!(err.property(), "Name");
    }

    #[test]
    fn test_null_collections_rejected() {
        let mut project = Project::new();
        assert_eq!(
            project.set_categories(None).unwrap_err().property(),
            "Categories"
        );
        assert_eq!(project.set_incomes(None).unwrap_err().property(), "Incomes");
        assert!(project.set_categories(Some(Vec::new())).is_ok());
    }

    #[test]
    fn test_add_category_links_and_dedupes() {
        let mut project = Project::new();
        assert!(project.add_category(named_category("Food")));
        assert!(!project.add_category(named_category("food")));
        assert_eq!(project.categories().len(), 1);
        assert_eq!(project.categories()[0].project_id(), Some(project.id()));
    }

    #[test]
    fn test_set_categories_rejects_duplicates_and_foreign() {
        let mut project = Project::new();
        project
            .set_categories(Some(vec![named_category("Food")]))
            .unwrap();

        let err = project
            .set_categories(Some(vec![named_category("Rent"), named_category("rent")]))
            .unwrap_err();
        assert_eq!(err.kind(), ValidationKind::DuplicateName);
        assert_eq!(err.property(), "Categories");

        let mut foreign = named_category("Travel");
        foreign.set_project(Some(ProjectId::new())).unwrap();
        let err = project.set_categories(Some(vec![foreign])).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::ForeignOwner);

        assert_eq!(project.categories().len(), 1);
        assert_eq!(project.categories()[0].name(), "Food");
    }

    #[test]
    fn test_validate_checks_category_links() {
        let mut project = Project::new();
        project.set_name(Some("Home")).unwrap();
        project.add_category(named_category("Food"));
        assert!(project.validate(&DatePolicy::default()).is_ok());

        let mut json = serde_json::to_value(&project).unwrap();
        json["categories"][0]["project_id"] = serde_json::json!(ProjectId::new());
        let tampered: Project = serde_json::from_value(json).unwrap();
        let err = tampered.validate(&DatePolicy::default()).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::ForeignOwner);
    }

    #[test]
    fn test_link_categories_only_adopts_unlinked() {
        let mut project = Project::new();
        project
            .set_categories(Some(vec![named_category("Food")]))
            .unwrap();
        assert_eq!(project.categories()[0].project_id(), None);

        project.link_categories();
        assert_eq!(project.categories()[0].project_id(), Some(project.id()));
    }

    #[test]
    fn test_balance() {
        let mut project = Project::new();
        let mut income = Income::new();
        income.set_amount(Money::from_units(1000)).unwrap();
        project.add_income(income);

        let mut category = named_category("Housing");
        let mut rent = crate::models::Expense::new();
        rent.set_amount(Money::from_units(450)).unwrap();
        category.add_expense(rent);
        project.add_category(category);

        assert_eq!(project.total_income(), Money::from_units(1000));
        assert_eq!(project.total_spent(), Money::from_units(450));
        assert_eq!(project.balance(), Money::from_units(550));
    }

    #[test]
    fn test_project_type_parse() {
        assert_eq!("family".parse::<ProjectType>().unwrap(), ProjectType::Family);
        assert!("galaxy".parse::<ProjectType>().is_err());
    }

    #[test]
    fn test_type_serialized_under_type_key() {
        let mut project = Project::new();
        project.set_type(ProjectType::Business);
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["type"], "Business");
    }
}
