//! EasyFinance - personal and family finance tracking
//!
//! Projects group categories of expenses and the incomes that fund them.
//! Every entity validates its fields in its setters, so a value that breaks
//! an invariant is rejected with a `ValidationError` naming the property
//! instead of being stored.
//!
//! # Architecture
//!
//! - `models`: entities with validating setters (projects, categories,
//!   expenses, items, attachments, incomes, users)
//! - `builders`: fluent construction over the setters
//! - `error`: validation and crate-wide error types
//! - `config`: path resolution and settings
//! - `storage`: JSON file repositories
//! - `audit`: JSONL audit log
//! - `crypto`: password hashing
//! - `services`: business logic on top of storage
//! - `cli`, `display`: command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use easyfinance::config::{EasyFinancePaths, Settings};
//! use easyfinance::storage::Storage;
//!
//! let paths = EasyFinancePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(paths)?;
//! storage.load_all()?;
//! ```

pub mod audit;
pub mod builders;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{EasyFinanceError, EasyFinanceResult, ValidationError, ValidationKind};
