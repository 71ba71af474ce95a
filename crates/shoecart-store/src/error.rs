//! # Store Error Types
//!
//! Error types for store operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Stock API     │  │     Storage             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Request        │  │  Storage                │ │
//! │  │  InvalidUrl     │  │  Status         │  │  Deserialization        │ │
//! │  │  ConfigLoad/Save│  │  Deserialization│  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │     State       │  │     Domain      │                              │
//! │  │                 │  │                 │                              │
//! │  │  StatePoisoned  │  │  Core           │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! │                                                                         │
//! │  None of these reach the caller of a cart operation: the store turns   │
//! │  them into a Notice at the operation boundary.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use shoecart_core::CoreError;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid cart configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Stock API Errors
    // =========================================================================
    /// The request never produced a response (connect, timeout, body read).
    #[error("Stock API request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status.
    #[error("Stock API returned {status} for {url}")]
    Status { status: u16, url: String },

    /// A payload (API response or stored snapshot) did not have the expected shape.
    #[error("Deserialization failed: {0}")]
    Deserialization(String),

    // =========================================================================
    // Storage Errors
    // =========================================================================
    #[error("Storage error: {0}")]
    Storage(String),

    // =========================================================================
    // State Errors
    // =========================================================================
    /// A previous holder of the cart lock panicked.
    #[error("Cart state lock poisoned")]
    StatePoisoned,

    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return StoreError::Status {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            };
        }
        if err.is_decode() {
            return StoreError::Deserialization(err.to_string());
        }
        StoreError::Request(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Deserialization(err.to_string())
    }
}

impl From<url::ParseError> for StoreError {
    fn from(err: url::ParseError) -> Self {
        StoreError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl StoreError {
    /// Returns true if the error came from talking to the stock API.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            StoreError::Request(_) | StoreError::Status { .. } | StoreError::Deserialization(_)
        )
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidConfig(_)
                | StoreError::InvalidUrl(_)
                | StoreError::ConfigLoadFailed(_)
                | StoreError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoecart_core::ProductId;

    #[test]
    fn test_categories() {
        assert!(StoreError::Request("connection refused".into()).is_remote());
        assert!(StoreError::Status {
            status: 404,
            url: "http://localhost/stock/1".into()
        }
        .is_remote());
        assert!(!StoreError::StatePoisoned.is_remote());

        assert!(StoreError::InvalidUrl("ftp://x".into()).is_config_error());
        assert!(!StoreError::Storage("disk full".into()).is_config_error());
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::Status {
            status: 500,
            url: "http://localhost:3333/stock/2".into(),
        };
        assert_eq!(
            err.to_string(),
            "Stock API returned 500 for http://localhost:3333/stock/2"
        );

        let err: StoreError = CoreError::ItemNotInCart(ProductId::new(2)).into();
        assert_eq!(err.to_string(), "Product 2 is not in the cart");
    }

    #[test]
    fn test_json_error_converts() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: StoreError = err.into();
        assert!(matches!(err, StoreError::Deserialization(_)));
    }
}
