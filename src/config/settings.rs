//! User settings for BudgetView
//!
//! Persisted as `config.json` in the base directory. Every field has a serde
//! default so older or hand-edited files keep loading.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::paths::BudgetViewPaths;
use crate::error::BudgetError;
use crate::models::UserId;

/// Which persistence provider backs the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON files under the data directory
    #[default]
    Local,
    /// Per-user document store
    Cloud,
}

impl std::str::FromStr for StorageBackend {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "cloud" => Ok(Self::Cloud),
            other => Err(BudgetError::Config(format!(
                "Unknown storage backend '{}' (expected local or cloud)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Cloud => write!(f, "cloud"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub backend: StorageBackend,

    /// Signed-in user for the cloud backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_user: Option<String>,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime format used when printing dates
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many recent transactions go into an advice request
    #[serde(default = "default_advice_sample_size")]
    pub advice_sample_size: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_advice_sample_size() -> usize {
    10
}

/// Whether chrono can render a calendar date with this strftime string.
///
/// Unknown specifiers and time-of-day fields both make `format` fail at
/// display time, so a sample date is rendered as well.
pub fn is_valid_date_format(format: &str) -> bool {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return false;
    }
    let mut rendered = String::new();
    write!(rendered, "{}", NaiveDate::MIN.format(format)).is_ok()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backend: StorageBackend::default(),
            cloud_user: None,
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            advice_sample_size: default_advice_sample_size(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetViewPaths) -> Result<Self, BudgetError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet; `init` decides when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| BudgetError::Io(format!("Failed to read settings file: {}", e)))?;

        let mut settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse settings file: {}", e)))?;

        if !is_valid_date_format(&settings.date_format) {
            warn!(
                date_format = %settings.date_format,
                "invalid date format in settings, using the default"
            );
            settings.date_format = default_date_format();
        }

        Ok(settings)
    }

    pub fn save(&self, paths: &BudgetViewPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The configured cloud user, if a non-blank one is set
    pub fn user_id(&self) -> Option<UserId> {
        self.cloud_user.as_deref().and_then(UserId::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.backend, StorageBackend::Local);
        assert_eq!(settings.currency_symbol, "$");
        assert_eq!(settings.advice_sample_size, 10);
        assert!(settings.user_id().is_none());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetViewPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            backend: StorageBackend::Cloud,
            cloud_user: Some("alice".into()),
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.backend, StorageBackend::Cloud);
        assert_eq!(loaded.user_id().unwrap().as_str(), "alice");
        assert_eq!(loaded.currency_symbol, "€");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetViewPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"backend": "cloud"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.backend, StorageBackend::Cloud);
        assert_eq!(loaded.date_format, "%Y-%m-%d");
        assert_eq!(loaded.schema_version, 1);
    }

    #[test]
    fn test_invalid_date_format_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetViewPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"date_format": "%Q"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.date_format, "%Y-%m-%d");
    }

    #[test]
    fn test_is_valid_date_format() {
        assert!(is_valid_date_format("%Y-%m-%d"));
        assert!(is_valid_date_format("%d/%m/%Y"));
        assert!(!is_valid_date_format("%Q"));
        assert!(!is_valid_date_format("%Y-%"));
        assert!(!is_valid_date_format("%Y %H:%M"));
    }

    #[test]
    fn test_blank_cloud_user_is_ignored() {
        let settings = Settings {
            cloud_user: Some("   ".into()),
            ..Settings::default()
        };
        assert!(settings.user_id().is_none());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("Cloud".parse::<StorageBackend>().unwrap(), StorageBackend::Cloud);
        assert!("ftp".parse::<StorageBackend>().is_err());
    }
}
