//! User account model
//!
//! Holds profile data and the argon2 hash of the password. The plaintext
//! password never reaches this type; see `services::account`.

use serde::{Deserialize, Serialize};

use super::ids::UserId;
use super::validation::require_text;
use crate::error::{ValidationError, ValidationKind, ValidationResult};

/// ISO 4217 codes a user may pick as preferred currency
pub const AVAILABLE_CURRENCIES: &[&str] = &[
    "AUD", "BRL", "CAD", "CHF", "CNY", "EUR", "GBP", "INR", "JPY", "MXN", "NZD", "USD",
];

pub const DEFAULT_CURRENCY: &str = "USD";

pub fn available_currencies() -> &'static [&'static str] {
    AVAILABLE_CURRENCIES
}

/// Check a plaintext password against the account password rules:
/// at least 8 characters, one lowercase, one uppercase, one digit, one
/// non-alphanumeric character and no spaces.
pub fn check_password_strength(password: &str, property: &str) -> ValidationResult<()> {
    let strong = password.chars().count() >= 8
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace())
        && !password.contains(' ');

    if !strong {
        return Err(ValidationError::new(ValidationKind::WeakPassword, property));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    preferred_currency: String,
    password_hash: String,
}

impl Default for User {
    fn default() -> Self {
        Self {
            id: UserId::new(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            preferred_currency: DEFAULT_CURRENCY.to_string(),
            password_hash: String::new(),
        }
    }
}

impl User {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn preferred_currency(&self) -> &str {
        &self.preferred_currency
    }

    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Stored lowercased; must look like `local@domain`
    pub fn set_email(&mut self, email: Option<&str>) -> ValidationResult<&mut Self> {
        let email = require_text(email.map(str::trim), "Email")?;
        let valid = match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
            None => false,
        };
        if !valid {
            return Err(ValidationError::new(ValidationKind::InvalidEmail, "Email"));
        }
        self.email = email.to_lowercase();
        Ok(self)
    }

    pub fn set_first_name(&mut self, first_name: Option<&str>) -> ValidationResult<&mut Self> {
        self.first_name = require_text(first_name, "FirstName")?;
        Ok(self)
    }

    pub fn set_last_name(&mut self, last_name: Option<&str>) -> ValidationResult<&mut Self> {
        self.last_name = require_text(last_name, "LastName")?;
        Ok(self)
    }

    pub fn set_preferred_currency(&mut self, currency: Option<&str>) -> ValidationResult<&mut Self> {
        let currency = require_text(currency, "PreferredCurrency")?.to_uppercase();
        if !AVAILABLE_CURRENCIES.contains(&currency.as_str()) {
            return Err(ValidationError::new(
                ValidationKind::UnsupportedCurrency,
                "PreferredCurrency",
            ));
        }
        self.preferred_currency = currency;
        Ok(self)
    }

    /// Store an already-computed password hash
    pub fn set_password_hash(&mut self, hash: Option<&str>) -> ValidationResult<&mut Self> {
        self.password_hash = require_text(hash, "PasswordHash")?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        let mut user = User::new();
        user.set_email(Some(" Jane@Example.com ")).unwrap();
        assert_eq!(user.email(), "jane@example.com");

        for bad in ["jane", "@example.com", "jane@", "a@b@c"] {
            let err = user.set_email(Some(bad)).unwrap_err();
            assert_eq!(err.kind(), ValidationKind::InvalidEmail);
        }
        assert_eq!(user.email(), "jane@example.com");

        let err = user.set_email(None).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::PropertyCantBeNullOrEmpty);
    }

    #[test]
    fn test_preferred_currency() {
        let mut user = User::new();
        assert_eq!(user.preferred_currency(), "USD");

        user.set_preferred_currency(Some("eur")).unwrap();
        assert_eq!(user.preferred_currency(), "EUR");

        let err = user.set_preferred_currency(Some("XYZ")).unwrap_err();
        assert_eq!(err.kind(), ValidationKind::UnsupportedCurrency);
        assert_eq!(user.preferred_currency(), "EUR");
    }

    #[test]
    fn test_names() {
        let mut user = User::new();
        user.set_first_name(Some("Jane")).unwrap();
        user.set_last_name(Some("Doe")).unwrap();
        assert_eq!(user.full_name(), "Jane Doe");
        assert_eq!(
            user.set_first_name(Some("")).unwrap_err().property(),
            "FirstName"
        );
    }

    #[test]
    fn test_password_strength() {
        assert!(check_password_strength("Passw0rd!", "Password").is_ok());
        for weak in ["short1!", "password1!", "PASSWORD1!", "Password!!", "Password12", "Pass w0rd!"] {
            let err = check_password_strength(weak, "Password").unwrap_err();
            assert_eq!(err.kind(), ValidationKind::WeakPassword);
        }
    }
}
