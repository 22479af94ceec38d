//! Configuration module for EasyFinance
//!
//! - XDG-compliant path resolution
//! - User settings persistence (currency, date policy, token lifetime)

pub mod paths;
pub mod settings;

pub use paths::EasyFinancePaths;
pub use settings::Settings;
