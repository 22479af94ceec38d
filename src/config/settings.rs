//! User settings for EasyFinance
//!
//! Persisted as `config.json`. Every field has a serde default so older or
//! hand-edited files keep loading.

use serde::{Deserialize, Serialize};

use super::paths::EasyFinancePaths;
use crate::crypto::HashParams;
use crate::error::EasyFinanceError;
use crate::models::user::DEFAULT_CURRENCY;
use crate::models::DatePolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency shown when no user is selected
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Date format for display (strftime)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How far in the past entity dates may reach
    #[serde(default)]
    pub date_policy: DatePolicy,

    /// Lifetime of an account-deletion confirmation token
    #[serde(default = "default_deletion_token_ttl_minutes")]
    pub deletion_token_ttl_minutes: i64,

    /// Argon2id cost for newly hashed passwords
    #[serde(default)]
    pub password_hash: HashParams,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_deletion_token_ttl_minutes() -> i64 {
    60
}

/// Upper bound for `deletion_token_ttl_minutes` (one year)
pub const MAX_DELETION_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_currency: default_currency(),
            date_format: default_date_format(),
            date_policy: DatePolicy::default(),
            deletion_token_ttl_minutes: default_deletion_token_ttl_minutes(),
            password_hash: HashParams::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &EasyFinancePaths) -> Result<Self, EasyFinanceError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| EasyFinanceError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| EasyFinanceError::Config(format!("Failed to parse settings file: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the services cannot work with
    pub fn validate(&self) -> Result<(), EasyFinanceError> {
        if !(1..=MAX_DELETION_TOKEN_TTL_MINUTES).contains(&self.deletion_token_ttl_minutes) {
            return Err(EasyFinanceError::Config(format!(
                "deletion_token_ttl_minutes must be between 1 and {}, got {}",
                MAX_DELETION_TOKEN_TTL_MINUTES, self.deletion_token_ttl_minutes
            )));
        }
        Ok(())
    }

    pub fn save(&self, paths: &EasyFinancePaths) -> Result<(), EasyFinanceError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| EasyFinanceError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| EasyFinanceError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.date_policy.max_years_in_past, 200);
        assert_eq!(settings.default_currency, "USD");
        assert_eq!(settings.deletion_token_ttl_minutes, 60);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EasyFinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.date_policy = DatePolicy::new(50);
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_policy.max_years_in_past, 50);
    }

    #[test]
    fn test_load_rejects_bad_token_lifetime() {
        let temp_dir = TempDir::new().unwrap();
        let paths = EasyFinancePaths::with_base_dir(temp_dir.path().to_path_buf());

        for ttl in ["0", "-30", "9223372036854775807"] {
            std::fs::write(
                paths.settings_file(),
                format!(r#"{{"deletion_token_ttl_minutes": {}}}"#, ttl),
            )
            .unwrap();
            let err = Settings::load_or_create(&paths).unwrap_err();
            assert!(matches!(err, EasyFinanceError::Config(_)), "ttl {}", ttl);
        }

        std::fs::write(paths.settings_file(), r#"{"deletion_token_ttl_minutes": 15}"#).unwrap();
        assert_eq!(
            Settings::load_or_create(&paths).unwrap().deletion_token_ttl_minutes,
            15
        );
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"default_currency": "EUR"}"#).unwrap();
        assert_eq!(settings.default_currency, "EUR");
        assert_eq!(settings.date_policy, DatePolicy::default());
        assert_eq!(settings.date_format, "%Y-%m-%d");
    }
}
