//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GOMARKET_CART_KEY` - Storage key holding the cart record (default: `@GoMarket:products`)
//! - `GOMARKET_DATA_DIR` - Directory used by [`FileStore`](crate::FileStore) (default: `.gomarket`)

use std::path::PathBuf;

use thiserror::Error;

/// Well-known key under which the whole cart is stored.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarket:products";

/// Default directory for file-backed storage.
pub const DEFAULT_DATA_DIR: &str = ".gomarket";

const CART_KEY_VAR: &str = "GOMARKET_CART_KEY";
const DATA_DIR_VAR: &str = "GOMARKET_DATA_DIR";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Key the cart record is read from and written to
    pub storage_key: String,
    /// Base directory for file-backed storage
    pub data_dir: PathBuf,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for a blank storage key or data
    /// directory.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let storage_key = get_or_default(&lookup, CART_KEY_VAR, DEFAULT_STORAGE_KEY)?;
        let data_dir = get_or_default(&lookup, DATA_DIR_VAR, DEFAULT_DATA_DIR)?;

        Ok(Self {
            storage_key,
            data_dir: PathBuf::from(data_dir),
        })
    }

    /// Override the storage key.
    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// Override the data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a variable with a default value, rejecting blank values.
fn get_or_default<F>(lookup: &F, key: &str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        )),
        Some(value) => Ok(value),
        None => Ok(default.to_string()),
    }
}
