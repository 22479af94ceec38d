//! Path management for EasyFinance
//!
//! ## Path Resolution Order
//!
//! 1. `EASYFINANCE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/easyfinance` or `~/.config/easyfinance`
//! 3. Windows: `%APPDATA%\easyfinance`

use std::path::PathBuf;

use crate::error::EasyFinanceError;

pub const DATA_DIR_ENV: &str = "EASYFINANCE_DATA_DIR";

/// Manages all paths used by EasyFinance
#[derive(Debug, Clone)]
pub struct EasyFinancePaths {
    base_dir: PathBuf,
}

impl EasyFinancePaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, EasyFinanceError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Projects with their categories, expenses and incomes
    pub fn projects_file(&self) -> PathBuf {
        self.data_dir().join("projects.json")
    }

    pub fn users_file(&self) -> PathBuf {
        self.data_dir().join("users.json")
    }

    /// Pending account-deletion confirmation tokens
    pub fn deletion_tokens_file(&self) -> PathBuf {
        self.data_dir().join("deletion_tokens.json")
    }

    /// Create the base and data directories
    pub fn ensure_directories(&self) -> Result<(), EasyFinanceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| EasyFinanceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| EasyFinanceError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, EasyFinanceError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                EasyFinanceError::Config("Could not determine HOME directory".into())
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("easyfinance"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, EasyFinanceError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| EasyFinanceError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("easyfinance"))
}
