//! Custom error types for EasyFinance
//!
//! Two layers: `ValidationError` is raised by entity setters and names the
//! offending property; `EasyFinanceError` is the crate-wide error returned by
//! storage, services and the CLI.

use std::fmt;

use thiserror::Error;

/// Message templates for validation failures. `{}` is the property name.
pub mod messages {
    pub const PROPERTY_CANT_BE_NULL_OR_EMPTY: &str = "{} can't be null or empty";
    pub const PROPERTY_CANT_BE_NULL: &str = "{} can't be null";
    pub const PROPERTY_CANT_BE_LESS_THAN_ZERO: &str = "{} can't be less than zero";
    pub const INVALID_DATE: &str = "Invalid date";
    pub const INVALID_EMAIL: &str = "{} is not a valid email address";
    pub const UNSUPPORTED_CURRENCY: &str = "{} is not a supported currency";
    pub const DUPLICATE_NAME: &str = "{} can't contain duplicate names";
    pub const FOREIGN_OWNER: &str = "{} can't belong to another project";
    pub const WEAK_PASSWORD: &str = "{} must have at least 8 characters, one lowercase, one uppercase, one digit, one special character and no spaces";

    /// Substitute the property name into a template
    pub fn format(template: &str, property: &str) -> String {
        template.replacen("{}", property, 1)
    }
}

/// Which rule a validation failure violated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationKind {
    PropertyCantBeNullOrEmpty,
    PropertyCantBeNull,
    PropertyCantBeLessThanZero,
    InvalidDate,
    InvalidEmail,
    UnsupportedCurrency,
    WeakPassword,
    DuplicateName,
    ForeignOwner,
}

impl ValidationKind {
    fn template(&self) -> &'static str {
        match self {
            Self::PropertyCantBeNullOrEmpty => messages::PROPERTY_CANT_BE_NULL_OR_EMPTY,
            Self::PropertyCantBeNull => messages::PROPERTY_CANT_BE_NULL,
            Self::PropertyCantBeLessThanZero => messages::PROPERTY_CANT_BE_LESS_THAN_ZERO,
            Self::InvalidDate => messages::INVALID_DATE,
            Self::InvalidEmail => messages::INVALID_EMAIL,
            Self::UnsupportedCurrency => messages::UNSUPPORTED_CURRENCY,
            Self::WeakPassword => messages::WEAK_PASSWORD,
            Self::DuplicateName => messages::DUPLICATE_NAME,
            Self::ForeignOwner => messages::FOREIGN_OWNER,
        }
    }
}

impl fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single violated field-level invariant
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    kind: ValidationKind,
    message: String,
    property: String,
}

impl ValidationError {
    /// Create a validation error for a property, rendering the rule's message
    pub fn new(kind: ValidationKind, property: impl Into<String>) -> Self {
        let property = property.into();
        Self {
            kind,
            message: messages::format(kind.template(), &property),
            property,
        }
    }

    pub fn null_or_empty(property: &str) -> Self {
        Self::new(ValidationKind::PropertyCantBeNullOrEmpty, property)
    }

    pub fn null(property: &str) -> Self {
        Self::new(ValidationKind::PropertyCantBeNull, property)
    }

    pub fn less_than_zero(property: &str) -> Self {
        Self::new(ValidationKind::PropertyCantBeLessThanZero, property)
    }

    pub fn invalid_date(property: &str) -> Self {
        Self::new(ValidationKind::InvalidDate, property)
    }

    pub fn kind(&self) -> ValidationKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn property(&self) -> &str {
        &self.property
    }
}

/// Result of a setter call
pub type ValidationResult<T> = Result<T, ValidationError>;

/// The main error type for EasyFinance operations
#[derive(Error, Debug)]
pub enum EasyFinanceError {
    /// A setter rejected a value
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Wrong credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Malformed command-line input such as an unparsable amount or date
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Password hashing failures
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Confirmation token missing, wrong or expired
    #[error("Invalid confirmation token")]
    InvalidToken,

    /// A patch operation could not be applied
    #[error("Patch error: {0}")]
    Patch(String),
}

impl EasyFinanceError {
    pub fn project_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Project",
            identifier: identifier.into(),
        }
    }

    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    pub fn income_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income",
            identifier: identifier.into(),
        }
    }

    pub fn user_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "User",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// The property a validation error refers to, if any
    pub fn property(&self) -> Option<&str> {
        match self {
            Self::Validation(e) => Some(e.property()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for EasyFinanceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for EasyFinanceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for EasyFinance operations
pub type EasyFinanceResult<T> = Result<T, EasyFinanceError>;
