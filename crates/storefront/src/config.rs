//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BOOKSHOP_DATA_DIR` - Directory holding persisted slots (default: .bookshop)
//! - `BOOKSHOP_CART_KEY` - Storage key of the cart (default: bookCart)
//! - `BOOKSHOP_CATALOG` - Path to the catalog JSON file
//! - `BOOKSHOP_CURRENCY` - Label printed after amounts (default: RUB)

use std::path::PathBuf;

use thiserror::Error;

use crate::cart::DEFAULT_CART_KEY;
use crate::storage::FileStorage;

const DEFAULT_DATA_DIR: &str = ".bookshop";
const DEFAULT_CURRENCY: &str = "RUB";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    /// Directory for file-backed storage
    pub data_dir: PathBuf,
    /// Storage key of the cart slot
    pub cart_key: String,
    /// Catalog JSON file, if any
    pub catalog_path: Option<PathBuf>,
    /// Currency label for display
    pub currency: String,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cart_key: DEFAULT_CART_KEY.to_string(),
            catalog_path: None,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but empty, or if the cart
    /// key cannot be used as a storage key.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`StorefrontConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = get_non_empty(&lookup, "BOOKSHOP_DATA_DIR")?
            .map_or(defaults.data_dir, PathBuf::from);
        let cart_key = get_non_empty(&lookup, "BOOKSHOP_CART_KEY")?.unwrap_or(defaults.cart_key);
        let catalog_path = get_non_empty(&lookup, "BOOKSHOP_CATALOG")?.map(PathBuf::from);
        let currency = get_non_empty(&lookup, "BOOKSHOP_CURRENCY")?.unwrap_or(defaults.currency);

        FileStorage::new(&data_dir)
            .path_for(&cart_key)
            .map_err(|e| ConfigError::InvalidEnvVar("BOOKSHOP_CART_KEY".to_string(), e.to_string()))?;

        Ok(Self {
            data_dir,
            cart_key,
            catalog_path,
            currency,
        })
    }

    /// File-backed storage rooted at the configured data directory.
    #[must_use]
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional variable, rejecting values that are set but blank.
fn get_non_empty(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Result<Option<String>, ConfigError> {
    match lookup(key) {
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must not be empty".to_string(),
        )),
        other => Ok(other),
    }
}
