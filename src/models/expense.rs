//! Expense and ExpenseItem models
//!
//! An expense records spending against a goal within a category. It may be
//! broken down into items, each of which may carry its own attachments and
//! sub-items.
//!
//! Every setter validates its argument before committing it: on failure the
//! field keeps its previous value and the returned `ValidationError` names the
//! property (`"Name"`, `"Goal"`, `"Amount"`, `"Date"`, `"CreatedBy"`,
//! `"Items"`, `"Attachments"`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::attachment::Attachment;
use super::ids::{ExpenseId, ExpenseItemId, UserId};
use super::money::Money;
use super::validation::{require_non_negative, require_present, require_text, DatePolicy};
use crate::error::ValidationResult;

/// A line within an expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseItem {
    id: ExpenseItemId,
    name: String,
    amount: Money,
    date: DateTime<Utc>,
    created_by: Option<UserId>,
    #[serde(default)]
    attachments: Vec<Attachment>,
    #[serde(default)]
    items: Vec<ExpenseItem>,
}

impl Default for ExpenseItem {
    fn default() -> Self {
        Self {
            id: ExpenseItemId::new(),
            name: String::new(),
            amount: Money::zero(),
            date: Utc::now(),
            created_by: None,
            attachments: Vec::new(),
            items: Vec::new(),
        }
    }
}

impl ExpenseItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> ExpenseItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn created_by(&self) -> Option<UserId> {
        self.created_by
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn items(&self) -> &[ExpenseItem] {
        &self.items
    }

    pub fn set_name(&mut self, name: Option<&str>) -> ValidationResult<&mut Self> {
        self.name = require_text(name, "Name")?;
        Ok(self)
    }

    pub fn set_amount(&mut self, amount: Money) -> ValidationResult<&mut Self> {
        self.amount = require_non_negative(amount, "Amount")?;
        Ok(self)
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) -> ValidationResult<&mut Self> {
        self.set_date_with_policy(date, &DatePolicy::default())
    }

    pub fn set_date_with_policy(
        &mut self,
        date: DateTime<Utc>,
        policy: &DatePolicy,
    ) -> ValidationResult<&mut Self> {
        self.date = policy.check(date, "Date")?;
        Ok(self)
    }

    pub fn set_created_by(&mut self, user: Option<UserId>) -> ValidationResult<&mut Self> {
        self.created_by = Some(require_present(user, "CreatedBy")?);
        Ok(self)
    }

    pub fn set_attachments(
        &mut self,
        attachments: Option<Vec<Attachment>>,
    ) -> ValidationResult<&mut Self> {
        self.attachments = require_present(attachments, "Attachments")?;
        Ok(self)
    }

    pub fn set_items(&mut self, items: Option<Vec<ExpenseItem>>) -> ValidationResult<&mut Self> {
        self.items = require_present(items, "Items")?;
        Ok(self)
    }

    /// This item's amount plus all of its sub-items
    pub fn total(&self) -> Money {
        self.amount + self.items.iter().map(ExpenseItem::total).sum::<Money>()
    }

    /// Re-run the setter checks, e.g. after deserialization
    pub fn validate(&self, policy: &DatePolicy) -> ValidationResult<()> {
        require_text(Some(&self.name), "Name")?;
        require_non_negative(self.amount, "Amount")?;
        policy.check(self.date, "Date")?;
        require_present(self.created_by, "CreatedBy")?;
        for attachment in &self.attachments {
            attachment.validate()?;
        }
        for item in &self.items {
            item.validate(policy)?;
        }
        Ok(())
    }
}

/// Spending recorded against a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    id: ExpenseId,
    name: String,
    goal: Money,
    amount: Money,
    date: DateTime<Utc>,
    created_by: Option<UserId>,
    #[serde(default)]
    items: Vec<ExpenseItem>,
    #[serde(default)]
    attachments: Vec<Attachment>,
}

impl Default for Expense {
    fn default() -> Self {
        Self {
            id: ExpenseId::new(),
            name: String::new(),
            goal: Money::zero(),
            amount: Money::zero(),
            date: Utc::now(),
            created_by: None,
            items: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

impl Expense {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> ExpenseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn goal(&self) -> Money {
        self.goal
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn created_by(&self) -> Option<UserId> {
        self.created_by
    }

    pub fn items(&self) -> &[ExpenseItem] {
        &self.items
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn set_name(&mut self, name: Option<&str>) -> ValidationResult<&mut Self> {
        self.name = require_text(name, "Name")?;
        Ok(self)
    }

    pub fn set_goal(&mut self, goal: Money) -> ValidationResult<&mut Self> {
        self.goal = require_non_negative(goal, "Goal")?;
        Ok(self)
    }

    pub fn set_amount(&mut self, amount: Money) -> ValidationResult<&mut Self> {
        self.amount = require_non_negative(amount, "Amount")?;
        Ok(self)
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) -> ValidationResult<&mut Self> {
        self.set_date_with_policy(date, &DatePolicy::default())
    }

    pub fn set_date_with_policy(
        &mut self,
        date: DateTime<Utc>,
        policy: &DatePolicy,
    ) -> ValidationResult<&mut Self> {
        self.date = policy.check(date, "Date")?;
        Ok(self)
    }

    pub fn set_created_by(&mut self, user: Option<UserId>) -> ValidationResult<&mut Self> {
        self.created_by = Some(require_present(user, "CreatedBy")?);
        Ok(self)
    }

    pub fn set_items(&mut self, items: Option<Vec<ExpenseItem>>) -> ValidationResult<&mut Self> {
        self.items = require_present(items, "Items")?;
        Ok(self)
    }

    pub fn set_attachments(
        &mut self,
        attachments: Option<Vec<Attachment>>,
    ) -> ValidationResult<&mut Self> {
        self.attachments = require_present(attachments, "Attachments")?;
        Ok(self)
    }

    pub fn add_item(&mut self, item: ExpenseItem) -> &mut Self {
        self.items.push(item);
        self
    }

    pub fn remove_item(&mut self, id: ExpenseItemId) -> Option<ExpenseItem> {
        let index = self.items.iter().position(|i| i.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Goal minus amount; negative when over goal
    pub fn remaining(&self) -> Money {
        self.goal - self.amount
    }

    pub fn is_over_goal(&self) -> bool {
        self.amount > self.goal
    }

    /// Re-run the setter checks, e.g. after deserialization
    pub fn validate(&self, policy: &DatePolicy) -> ValidationResult<()> {
        require_text(Some(&self.name), "Name")?;
        require_non_negative(self.goal, "Goal")?;
        require_non_negative(self.amount, "Amount")?;
        policy.check(self.date, "Date")?;
        require_present(self.created_by, "CreatedBy")?;
        for item in &self.items {
            item.validate(policy)?;
        }
        for attachment in &self.attachments {
            attachment.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationKind;
    use chrono::Duration;

    #[test]
    fn test_rejected_value_leaves_field_unchanged() {
        let mut expense = Expense::new();
        expense.set_goal(Money::from_units(500)).unwrap();

        let err = expense.set_goal(Money::from_units(-1)).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::PropertyCantBeLessThanZero);
        assert_eq!(expense.goal(), Money::from_units(500));

        expense.set_name(Some("Rent")).unwrap();
        assert!(expense.set_name(None).is_err());
        assert_eq!(expense.name(), "Rent");
    }

    #[test]
    fn test_validate_requires_created_by() {
        let policy = DatePolicy::default();

        let mut expense = Expense::new();
        expense.set_name(Some("Rent")).unwrap();
        let err = expense.validate(&policy).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::PropertyCantBeNull);
        assert_eq!(err.message(), "CreatedBy can't be null");

        let mut item = ExpenseItem::new();
        item.set_name(Some("Deposit")).unwrap();
        let err = item.validate(&policy).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::PropertyCantBeNull);
        assert_eq!(err.property(), "CreatedBy");

        expense.set_created_by(Some(UserId::new())).unwrap();
        assert!(expense.validate(&policy).is_ok());
    }

    #[test]
    fn test_setters_chain() {
        let user = UserId::new();
        let mut expense = Expense::new();
        expense
            .set_name(Some("Groceries"))
            .and_then(|e| e.set_amount(Money::from_units(120)))
            .and_then(|e| e.set_created_by(Some(user)))
            .unwrap();

        assert_eq!(expense.name(), "Groceries");
        assert_eq!(expense.amount(), Money::from_units(120));
        assert_eq!(expense.created_by(), Some(user));
    }

    #[test]
    fn test_remaining_and_over_goal() {
        let mut expense = Expense::new();
        expense.set_goal(Money::from_units(500)).unwrap();
        expense.set_amount(Money::from_units(450)).unwrap();
        assert_eq!(expense.remaining(), Money::from_units(50));
        assert!(!expense.is_over_goal());

        expense.set_amount(Money::from_units(600)).unwrap();
        assert!(expense.is_over_goal());
    }

    #[test]
    fn test_item_total_includes_sub_items() {
        let mut sub = ExpenseItem::new();
        sub.set_amount(Money::from_units(5)).unwrap();

        let mut item = ExpenseItem::new();
        item.set_amount(Money::from_units(10)).unwrap();
        item.set_items(Some(vec![sub])).unwrap();

        assert_eq!(item.total(), Money::from_units(15));
    }

    #[test]
    fn test_remove_item() {
        let item = ExpenseItem::new();
        let id = item.id();
        let mut expense = Expense::new();
        expense.add_item(item);

        assert!(expense.remove_item(id).is_some());
        assert!(expense.items().is_empty());
        assert!(expense.remove_item(id).is_none());
    }

    #[test]
    fn test_validate_after_deserialize() {
        let policy = DatePolicy::default();
        let mut expense = Expense::new();
        expense.set_name(Some("Rent")).unwrap();
        expense.set_created_by(Some(UserId::new())).unwrap();
        expense.set_date(Utc::now() - Duration::days(3)).unwrap();
        assert!(expense.validate(&policy).is_ok());

        let mut json = serde_json::to_value(&expense).unwrap();
        json["amount"] = serde_json::json!(-100);
        let tampered: Expense = serde_json::from_value(json).unwrap();
        let err = tampered.validate(&policy).unwrap_err();
        assert_eq!(err.property(), "Amount");
    }
}
