//! Income model
//!
//! Money received within a project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{IncomeId, UserId};
use super::money::Money;
use super::validation::{require_non_negative, require_present, require_text, DatePolicy};
use crate::error::ValidationResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Income {
    id: IncomeId,
    name: String,
    amount: Money,
    date: DateTime<Utc>,
    #[serde(default)]
    description: String,
    created_by: Option<UserId>,
}

impl Default for Income {
    fn default() -> Self {
        Self {
            id: IncomeId::new(),
            name: String::new(),
            amount: Money::zero(),
            date: Utc::now(),
            description: String::new(),
            created_by: None,
        }
    }
}

impl Income {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> IncomeId {
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

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn created_by(&self) -> Option<UserId> {
        self.created_by
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

    /// Free text; an empty description is allowed
    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    pub fn set_created_by(&mut self, user: Option<UserId>) -> ValidationResult<&mut Self> {
        self.created_by = Some(require_present(user, "CreatedBy")?);
        Ok(self)
    }

    pub fn validate(&self, policy: &DatePolicy) -> ValidationResult<()> {
        require_text(Some(&self.name), "Name")?;
        require_non_negative(self.amount, "Amount")?;
        policy.check(self.date, "Date")?;
        require_present(self.created_by, "CreatedBy")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationKind;
    use chrono::Duration;

    #[test]
    fn test_negative_amount_rejected() {
        let mut income = Income::new();
        for cents in [-1, -25000] {
            let err = income.set_amount(Money::from_cents(cents)).unwrap_err();
            assert_eq!(err.kind(), ValidationKind::PropertyCantBeLessThanZero);
            assert_eq!(err.property(), "Amount");
        }
        assert!(income.set_amount(Money::zero()).is_ok());
    }

    #[test]
    fn test_future_date_rejected() {
        let mut income = Income::new();
        let err = income.set_date(Utc::now() + Duration::days(1)).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::InvalidDate);
    }

    #[test]
    fn test_description_is_free_text() {
        let mut income = Income::new();
        income.set_description("March salary");
        assert_eq!(income.description(), "March salary");
        income.set_description("");
        assert!(income.description().is_empty());
    }
}
