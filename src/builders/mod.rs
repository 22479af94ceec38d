//! Fluent builders over the entity setters
//!
//! Each `add_*` call delegates to the matching setter. The first rejected
//! value is kept and every later `add_*` call is skipped, so `build()`
//! returns exactly the failure that aborted construction.
//!
//! ```
//! use easyfinance::builders::ExpenseBuilder;
//! use easyfinance::models::Money;
//!
//! let err = ExpenseBuilder::new()
//!     .add_name(Some("Rent"))
//!     .add_goal(Money::from_units(-1))
//!     .build()
//!     .unwrap_err();
//! assert_eq!(err.property(), "Goal");
//! ```

mod expense;
mod project;

pub use expense::{AttachmentBuilder, ExpenseBuilder, ExpenseItemBuilder};
pub use project::{CategoryBuilder, IncomeBuilder, ProjectBuilder};

use crate::error::{ValidationError, ValidationResult};

/// Draft entity, or the failure that aborted it
#[derive(Debug, Clone)]
pub(crate) struct Draft<T>(ValidationResult<T>);

impl<T> Draft<T> {
    pub(crate) fn new(entity: T) -> Self {
        Self(Ok(entity))
    }

    /// Apply a setter unless construction has already failed
    pub(crate) fn apply<F>(self, setter: F) -> Self
    where
        F: FnOnce(&mut T) -> Result<(), ValidationError>,
    {
        match self.0 {
            Ok(mut entity) => match setter(&mut entity) {
                Ok(()) => Self(Ok(entity)),
                Err(e) => Self(Err(e)),
            },
            failed => Self(failed),
        }
    }

    pub(crate) fn finish(self) -> ValidationResult<T> {
        self.0
    }
}
