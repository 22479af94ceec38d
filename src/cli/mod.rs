//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod category;
pub mod expense;
pub mod income;
pub mod project;

pub use account::{handle_account_command, AccountCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use project::{handle_project_command, ProjectCommands};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::config::Settings;
use crate::crypto::SecureString;
use crate::error::{EasyFinanceError, EasyFinanceResult};
use crate::models::{Money, UserId};
use crate::services::AccountService;
use crate::storage::Storage;

/// Parse an amount such as "450" or "450.50"
pub fn parse_money(input: &str, field: &str) -> EasyFinanceResult<Money> {
    Money::parse(input)
        .map_err(|e| EasyFinanceError::InvalidInput(format!("Invalid {}: {}", field, e)))
}

/// Parse a `YYYY-MM-DD` date as midnight UTC; `None` means now
pub fn parse_date(input: Option<&str>) -> EasyFinanceResult<DateTime<Utc>> {
    let Some(input) = input else {
        return Ok(Utc::now());
    };

    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        EasyFinanceError::InvalidInput(format!("Invalid date '{}', expected YYYY-MM-DD", input))
    })?;

    Ok(date.and_time(NaiveTime::MIN).and_utc())
}

/// The acting user's id, looked up by email
///
/// `None` when no user was given; entities created without one are rejected
/// by their `CreatedBy` check.
pub fn resolve_user(
    storage: &Storage,
    settings: &Settings,
    email: Option<&str>,
) -> EasyFinanceResult<Option<UserId>> {
    let Some(email) = email else {
        return Ok(None);
    };

    AccountService::with_settings(storage, settings)
        .find_by_email(email)?
        .map(|u| Some(u.id()))
        .ok_or_else(|| EasyFinanceError::user_not_found(email))
}

/// Use the given password, or prompt for one on the terminal
pub fn read_password(given: Option<String>, prompt: &str) -> EasyFinanceResult<SecureString> {
    match given {
        Some(password) => Ok(SecureString::from(password)),
        None => rpassword::prompt_password(prompt)
            .map(SecureString::from)
            .map_err(|e| EasyFinanceError::Io(format!("Failed to read password: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_money() {
        assert_eq!(parse_money("450.50", "amount").unwrap(), Money::from_cents(45050));
        let err = parse_money("abc", "goal").unwrap_err();
        assert!(err.to_string().contains("Invalid goal"));
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date(Some("2024-03-15")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 3, 15));

        assert!(matches!(
            parse_date(Some("15/03/2024")).unwrap_err(),
            EasyFinanceError::InvalidInput(_)
        ));
        assert!(parse_date(None).unwrap() <= Utc::now());
    }
}
