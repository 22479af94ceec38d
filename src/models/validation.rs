//! Guard clauses shared by every entity setter
//!
//! Each helper either returns the value to commit or the `ValidationError`
//! naming the property. Setters call these before touching their field, so a
//! rejected value never reaches the entity.

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;
use crate::error::{ValidationError, ValidationResult};

/// Text must be present and non-empty
pub fn require_text(value: Option<&str>, property: &str) -> ValidationResult<String> {
    match value {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ValidationError::null_or_empty(property)),
    }
}

/// A reference or collection must be present; an empty collection is fine
pub fn require_present<T>(value: Option<T>, property: &str) -> ValidationResult<T> {
    value.ok_or_else(|| ValidationError::null(property))
}

/// Amounts may be zero but never negative
pub fn require_non_negative(value: Money, property: &str) -> ValidationResult<Money> {
    if value.is_negative() {
        return Err(ValidationError::less_than_zero(property));
    }
    Ok(value)
}

/// How far back an entity date may reach
///
/// A date is valid when it lies in `(now - max_years_in_past, now]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePolicy {
    #[serde(default = "default_max_years_in_past")]
    pub max_years_in_past: u32,
}

fn default_max_years_in_past() -> u32 {
    200
}

impl Default for DatePolicy {
    fn default() -> Self {
        Self {
            max_years_in_past: default_max_years_in_past(),
        }
    }
}

impl DatePolicy {
    pub fn new(max_years_in_past: u32) -> Self {
        Self { max_years_in_past }
    }

    /// Validate a date against the current moment
    pub fn check(&self, date: DateTime<Utc>, property: &str) -> ValidationResult<DateTime<Utc>> {
        self.check_at(date, Utc::now(), property)
    }

    /// Validate a date against a given "now"
    pub fn check_at(
        &self,
        date: DateTime<Utc>,
        now: DateTime<Utc>,
        property: &str,
    ) -> ValidationResult<DateTime<Utc>> {
        if date > now {
            return Err(ValidationError::invalid_date(property));
        }

        // An unrepresentable lower bound means every past date is in range
        let earliest = now.checked_sub_months(Months::new(self.max_years_in_past.saturating_mul(12)));
        if let Some(earliest) = earliest {
            if date <= earliest {
                return Err(ValidationError::invalid_date(property));
            }
        }

        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationKind;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_require_text() {
        assert_eq!(require_text(Some("Rent"), "Name").unwrap(), "Rent");

        let err = require_text(Some(""), "Name").unwrap_err();
        assert_eq!(err.kind(), ValidationKind::PropertyCantBeNullOrEmpty);
        assert_eq!(err.property(), "Name");

        assert!(require_text(None, "Name").is_err());
    }

    #[test]
    fn test_require_present() {
        let empty: Vec<u8> = Vec::new();
        assert!(require_present(Some(empty), "Items").unwrap().is_empty());

        let err = require_present::<Vec<u8>>(None, "Items").unwrap_err();
        assert_eq!(err.kind(), ValidationKind::PropertyCantBeNull);
    }

    #[test]
    fn test_require_non_negative() {
        assert!(require_non_negative(Money::zero(), "Amount").is_ok());
        assert!(require_non_negative(Money::from_cents(1), "Amount").is_ok());

        let err = require_non_negative(Money::from_cents(-1), "Amount").unwrap_err();
        assert_eq!(err.kind(), ValidationKind::PropertyCantBeLessThanZero);
        assert_eq!(err.property(), "Amount");
    }

    #[test]
    fn test_date_bounds() {
        let policy = DatePolicy::default();
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();

        assert!(policy.check_at(now, now, "Date").is_ok());
        assert!(policy.check_at(now - Duration::days(1), now, "Date").is_ok());
        assert!(policy
            .check_at(Utc.with_ymd_and_hms(1824, 6, 15, 12, 0, 1).unwrap(), now, "Date")
            .is_ok());

        let future = now + Duration::seconds(1);
        let err = policy.check_at(future, now, "Date").unwrap_err();
        assert_eq!(err.kind(), ValidationKind::InvalidDate);

        let boundary = Utc.with_ymd_and_hms(1824, 6, 15, 12, 0, 0).unwrap();
        assert!(policy.check_at(boundary, now, "Date").is_err());
        assert!(policy.check_at(boundary - Duration::days(1), now, "Date").is_err());
    }

    #[test]
    fn test_configurable_bound() {
        let policy = DatePolicy::new(1);
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap();

        assert!(policy.check_at(now - Duration::days(200), now, "Date").is_ok());
        assert!(policy.check_at(now - Duration::days(400), now, "Date").is_err());
    }
}
