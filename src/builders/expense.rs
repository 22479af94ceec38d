//! Builders for expenses, expense items and attachments

use chrono::{DateTime, Utc};

use super::Draft;
use crate::error::ValidationResult;
use crate::models::{
    Attachment, AttachmentType, DatePolicy, Expense, ExpenseItem, Money, UserId,
};

#[derive(Debug, Clone)]
pub struct ExpenseBuilder {
    draft: Draft<Expense>,
    policy: DatePolicy,
}

impl Default for ExpenseBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseBuilder {
    pub fn new() -> Self {
        Self {
            draft: Draft::new(Expense::new()),
            policy: DatePolicy::default(),
        }
    }

    /// Validate dates against a non-default policy
    pub fn with_date_policy(mut self, policy: DatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn add_name(mut self, name: Option<&str>) -> Self {
        self.draft = self.draft.apply(|e| e.set_name(name).map(drop));
        self
    }

    pub fn add_goal(mut self, goal: Money) -> Self {
        self.draft = self.draft.apply(|e| e.set_goal(goal).map(drop));
        self
    }

    pub fn add_amount(mut self, amount: Money) -> Self {
        self.draft = self.draft.apply(|e| e.set_amount(amount).map(drop));
        self
    }

    pub fn add_date(mut self, date: DateTime<Utc>) -> Self {
        let policy = self.policy;
        self.draft = self
            .draft
            .apply(|e| e.set_date_with_policy(date, &policy).map(drop));
        self
    }

    pub fn add_created_by(mut self, user: Option<UserId>) -> Self {
        self.draft = self.draft.apply(|e| e.set_created_by(user).map(drop));
        self
    }

    pub fn add_items(mut self, items: Option<Vec<ExpenseItem>>) -> Self {
        self.draft = self.draft.apply(|e| e.set_items(items).map(drop));
        self
    }

    pub fn add_attachments(mut self, attachments: Option<Vec<Attachment>>) -> Self {
        self.draft = self.draft.apply(|e| e.set_attachments(attachments).map(drop));
        self
    }

    pub fn build(self) -> ValidationResult<Expense> {
        self.draft.finish()
    }
}

#[derive(Debug, Clone)]
pub struct ExpenseItemBuilder {
    draft: Draft<ExpenseItem>,
    policy: DatePolicy,
}

impl Default for ExpenseItemBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpenseItemBuilder {
    pub fn new() -> Self {
        Self {
            draft: Draft::new(ExpenseItem::new()),
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

    pub fn add_created_by(mut self, user: Option<UserId>) -> Self {
        self.draft = self.draft.apply(|i| i.set_created_by(user).map(drop));
        self
    }

    pub fn add_attachments(mut self, attachments: Option<Vec<Attachment>>) -> Self {
        self.draft = self.draft.apply(|i| i.set_attachments(attachments).map(drop));
        self
    }

    pub fn add_items(mut self, items: Option<Vec<ExpenseItem>>) -> Self {
        self.draft = self.draft.apply(|i| i.set_items(items).map(drop));
        self
    }

    pub fn build(self) -> ValidationResult<ExpenseItem> {
        self.draft.finish()
    }
}

#[derive(Debug, Clone)]
pub struct AttachmentBuilder {
    draft: Draft<Attachment>,
}

impl Default for AttachmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AttachmentBuilder {
    pub fn new() -> Self {
        Self {
            draft: Draft::new(Attachment::new()),
        }
    }

    pub fn add_name(mut self, name: Option<&str>) -> Self {
        self.draft = self.draft.apply(|a| a.set_name(name).map(drop));
        self
    }

    pub fn add_type(mut self, attachment_type: AttachmentType) -> Self {
        self.draft = self.draft.apply(|a| {
            a.set_type(attachment_type);
            Ok(())
        });
        self
    }

    pub fn build(self) -> ValidationResult<Attachment> {
        self.draft.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationKind;
    use chrono::{Duration, Months};

    #[test]
    fn test_negative_goal() {
        for cents in [-100, -25000] {
            let err = ExpenseBuilder::new()
                .add_goal(Money::from_cents(cents))
                .build()
                .unwrap_err();
            assert_eq!(err.kind(), ValidationKind::PropertyCantBeLessThanZero);
            assert_eq!(err.message(), "Goal can't be less than zero");
            assert_eq!(err.property(), "Goal");
        }
    }

    #[test]
    fn test_negative_amount() {
        for cents in [-100, -25000] {
            let err = ExpenseBuilder::new()
                .add_amount(Money::from_cents(cents))
                .build()
                .unwrap_err();
            assert_eq!(err.message(), "Amount can't be less than zero");
            assert_eq!(err.property(), "Amount");
        }
    }

    #[test]
    fn test_zero_and_positive_amounts_accepted() {
        for cents in [0, 1, 45000] {
            let expense = ExpenseBuilder::new()
                .add_goal(Money::from_cents(cents))
                .add_amount(Money::from_cents(cents))
                .build()
                .unwrap();
            assert_eq!(expense.goal().cents(), cents);
        }
    }

    #[test]
    fn test_null_and_empty_name() {
        for name in [None, Some("")] {
            let err = ExpenseBuilder::new().add_name(name).build().unwrap_err();
            assert_eq!(err.kind(), ValidationKind::PropertyCantBeNullOrEmpty);
            assert_eq!(err.message(), "Name can't be null or empty");
            assert_eq!(err.property(), "Name");
        }
    }

    #[test]
    fn test_invalid_dates() {
        let now = Utc::now();
        let invalid = [
            now + Duration::days(1),
            now.checked_sub_months(Months::new(200 * 12)).unwrap(),
        ];
        for date in invalid {
            let err = ExpenseBuilder::new().add_date(date).build().unwrap_err();
            assert_eq!(err.kind(), ValidationKind::InvalidDate);
            assert_eq!(err.message(), "Invalid date");
            assert_eq!(err.property(), "Date");
        }
    }

    #[test]
    fn test_valid_dates() {
        let now = Utc::now();
        let valid = [
            now,
            now - Duration::days(1),
            now.checked_sub_months(Months::new(199 * 12)).unwrap(),
        ];
        for date in valid {
            let expense = ExpenseBuilder::new().add_date(date).build().unwrap();
            assert_eq!(expense.date(), date);
        }
    }

    #[test]
    fn test_custom_date_policy() {
        let date = Utc::now() - Duration::days(400);
        assert!(ExpenseBuilder::new().add_date(date).build().is_ok());

        let err = ExpenseBuilder::new()
            .with_date_policy(DatePolicy::new(1))
            .add_date(date)
            .build()
            .unwrap_err();
        assert_eq!(err.property(), "Date");
    }

    #[test]
    fn test_null_created_by() {
        let err = ExpenseBuilder::new()
            .add_created_by(None)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ValidationKind::PropertyCantBeNull);
        assert_eq!(err.message(), "CreatedBy can't be null");
        assert_eq!(err.property(), "CreatedBy");
    }

    #[test]
    fn test_null_attachments() {
        let err = ExpenseItemBuilder::new()
            .add_attachments(None)
            .build()
            .unwrap_err();
        assert_eq!(err.message(), "Attachments can't be null");
        assert_eq!(err.property(), "Attachments");
    }

    #[test]
    fn test_null_items() {
        let err = ExpenseItemBuilder::new()
            .add_items(None)
            .build()
            .unwrap_err();
        assert_eq!(err.message(), "Items can't be null");
        assert_eq!(err.property(), "Items");
    }

    #[test]
    fn test_empty_collections_accepted() {
        let item = ExpenseItemBuilder::new()
            .add_attachments(Some(Vec::new()))
            .add_items(Some(Vec::new()))
            .build()
            .unwrap();
        assert!(item.attachments().is_empty());
        assert!(item.items().is_empty());
    }

    #[test]
    fn test_round_trip() {
        let user = UserId::new();
        let today = Utc::now();
        let expense = ExpenseBuilder::new()
            .add_name(Some("Rent"))
            .add_goal(Money::from_units(500))
            .add_amount(Money::from_units(450))
            .add_date(today)
            .add_created_by(Some(user))
            .build()
            .unwrap();

        assert_eq!(expense.name(), "Rent");
        assert_eq!(expense.goal(), Money::from_units(500));
        assert_eq!(expense.amount(), Money::from_units(450));
        assert_eq!(expense.date(), today);
        assert_eq!(expense.created_by(), Some(user));
    }

    #[test]
    fn test_idempotent_setter() {
        let once = ExpenseBuilder::new()
            .add_name(Some("Rent"))
            .build()
            .unwrap();
        let mut twice = once.clone();
        twice.set_name(Some("Rent")).unwrap();
        twice.set_name(Some("Rent")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_first_failure_wins() {
        let err = ExpenseBuilder::new()
            .add_name(Some(""))
            .add_goal(Money::from_cents(-1))
            .build()
            .unwrap_err();
        assert_eq!(err.property(), "Name");
    }

    #[test]
    fn test_attachment_builder() {
        let attachment = AttachmentBuilder::new()
            .add_name(Some("invoice.pdf"))
            .add_type(AttachmentType::Invoice)
            .build()
            .unwrap();
        assert_eq!(attachment.attachment_type(), AttachmentType::Invoice);

        let err = AttachmentBuilder::new().add_name(None).build().unwrap_err();
        assert_eq!(err.property(), "Name");
    }
}
