//! Unified error system for Verdant core
//!
//! Policy outcomes (an unknown plan or role) are never represented here; they
//! resolve to fail-closed results. Errors are reserved for configuration
//! problems and for callers that explicitly ask for a denial as an error.

use serde::{Deserialize, Serialize};

/// Unified error type for all Verdant operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum VerdantError {
    /// Invalid input
    #[error("Invalid: {message}")]
    Invalid {
        /// Error message describing the invalid input
        message: String,
    },

    /// Permission denied
    #[error("Permission denied: {message}")]
    PermissionDenied {
        /// Error message describing the permission issue
        message: String,
    },

    /// Configuration could not be loaded or failed validation
    #[error("Config error: {message}")]
    Config {
        /// Error message describing the configuration problem
        message: String,
    },
}

impl VerdantError {
    /// Create an invalid input error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error denotes a denied permission.
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }
}

/// Standard Result type for Verdant operations
pub type Result<T> = std::result::Result<T, VerdantError>;

impl From<toml::de::Error> for VerdantError {
    fn from(err: toml::de::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<std::io::Error> for VerdantError {
    fn from(err: std::io::Error) -> Self {
        Self::config(format!("I/O error: {err}"))
    }
}
