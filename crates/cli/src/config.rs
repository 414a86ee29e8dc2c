//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `INVENTORY_DATA_DIR` - Directory holding the persisted inventory (default: `.inventory`)
//! - `INVENTORY_STORAGE_KEY` - Root key of the storage slot (default: `root`)
//! - `RUST_LOG` - Log filter (default: `shop_inventory_cli=info,shop_inventory_core=info`)

use std::path::PathBuf;

use shop_inventory_core::persist::DEFAULT_ROOT_KEY;
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".inventory";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory where the storage slot file lives
    pub data_dir: PathBuf,
    /// Root key of the storage slot (stored as `persist:<key>`)
    pub storage_key: String,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let data_dir = lookup("INVENTORY_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());
        if data_dir.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "INVENTORY_DATA_DIR".to_string(),
                "must not be blank".to_string(),
            ));
        }

        let storage_key =
            lookup("INVENTORY_STORAGE_KEY").unwrap_or_else(|| DEFAULT_ROOT_KEY.to_string());
        validate_storage_key(&storage_key)?;

        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            storage_key,
        })
    }

    /// Replace the data directory (e.g. from a command-line flag).
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: Option<PathBuf>) -> Self {
        if let Some(data_dir) = data_dir {
            self.data_dir = data_dir;
        }
        self
    }
}

/// Storage keys may only use ASCII letters, digits, `-` and `_`.
fn validate_storage_key(key: &str) -> Result<(), ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            "INVENTORY_STORAGE_KEY".to_string(),
            "must not be empty".to_string(),
        ));
    }
    if let Some(c) = key
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(ConfigError::InvalidEnvVar(
            "INVENTORY_STORAGE_KEY".to_string(),
            format!("invalid character '{c}'"),
        ));
    }
    Ok(())
}
