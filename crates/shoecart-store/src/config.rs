//! # Cart Configuration
//!
//! Configuration for the stock API client, the storage location and the
//! mutation policy.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     SHOECART_API_URL=http://localhost:3333                             │
//! │     SHOECART_STORAGE_PATH=/tmp/cart.json                               │
//! │     SHOECART_STORAGE_KEY=@RocketShoes:cart                             │
//! │     SHOECART_MUTATION_POLICY=serialized                                │
//! │     SHOECART_REQUEST_TIMEOUT_SECS=10                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/shoecart/cart.toml (Linux)                               │
//! │     ~/Library/Application Support/com.shoecart.shoecart/cart.toml      │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [api]
//! base_url = "http://localhost:3333"
//! request_timeout_secs = 10
//!
//! [storage]
//! path = "/var/lib/shoecart/storage.json"
//! key = "@RocketShoes:cart"
//!
//! [cart]
//! mutation_policy = "concurrent"  # concurrent | serialized
//! ```

use serde::{Deserialize, Serialize};
use shoecart_core::DEFAULT_STORAGE_KEY;
use std::path::PathBuf;
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Mutation Policy
// =============================================================================

/// Whether cart operations may interleave.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CONCURRENT (Default)                                                   │
/// │  ────────────────────                                                   │
/// │  • No lock is held while awaiting the stock API                         │
/// │  • Two add_product(1) calls can both see amount=2, both pass the        │
/// │    stock check, and both commit amount=3 (last write wins)              │
/// │  • Operations interleave at the stock query                             │
/// │                                                                         │
/// │  SERIALIZED                                                             │
/// │  ──────────                                                             │
/// │  • One operation at a time, stock query included                        │
/// │  • The second add_product(1) sees amount=3 and checks stock again       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationPolicy {
    #[default]
    Concurrent,
    Serialized,
}

impl std::fmt::Display for MutationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MutationPolicy::Concurrent => write!(f, "concurrent"),
            MutationPolicy::Serialized => write!(f, "serialized"),
        }
    }
}

impl std::str::FromStr for MutationPolicy {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "concurrent" => Ok(MutationPolicy::Concurrent),
            "serialized" | "serial" => Ok(MutationPolicy::Serialized),
            other => Err(StoreError::InvalidConfig(format!(
                "Unknown mutation policy: '{}'. Valid options: concurrent, serialized",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Stock/catalog API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL; `stock/{id}` and `products/{id}` are resolved against it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Unset means requests may wait indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "http://localhost:3333".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Where the cart snapshot lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Storage file. Defaults to `storage.json` in the platform data dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Key the snapshot is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            path: None,
            key: default_storage_key(),
        }
    }
}

impl StorageSettings {
    /// The configured path, or the platform default.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(|| {
            project_dirs().map(|dirs| dirs.data_dir().join("storage.json"))
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartSettings {
    #[serde(default)]
    pub mutation_policy: MutationPolicy,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete cart configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub cart: CartSettings,
}

impl CartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| StoreError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> StoreResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| StoreError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| StoreError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Cart config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(StoreError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.request_timeout_secs == Some(0) {
            return Err(StoreError::InvalidConfig(
                "request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.key.trim().is_empty() {
            return Err(StoreError::InvalidConfig("storage key must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `SHOECART_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("SHOECART_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(secs) = lookup("SHOECART_REQUEST_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(s) => self.api.request_timeout_secs = Some(s),
                Err(_) => warn!(value = %secs, "Ignoring non-numeric request timeout"),
            }
        }

        if let Some(path) = lookup("SHOECART_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("SHOECART_STORAGE_KEY") {
            self.storage.key = key;
        }

        if let Some(policy) = lookup("SHOECART_MUTATION_POLICY") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding mutation policy from environment");
                    self.cart.mutation_policy = parsed;
                }
                Err(_) => warn!(policy = %policy, "Unknown mutation policy in environment"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("cart.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn storage_key(&self) -> &str {
        &self.storage.key
    }

    pub fn mutation_policy(&self) -> MutationPolicy {
        self.cart.mutation_policy
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "shoecart", "shoecart")
}
