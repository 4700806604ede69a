//! Custom error types for applister
//!
//! This module defines the error hierarchy for the library using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for applister operations
#[derive(Error, Debug)]
pub enum ApplisterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The package registry could not be queried
    #[error("Package registry error: {0}")]
    Registry(String),

    /// Backup creation or deletion failed
    #[error("Backup error: {0}")]
    Backup(String),

    /// A backup bundle could not be parsed for restore
    #[error("Restore error: {0}")]
    Restore(String),

    /// Formatting an export failed
    #[error("Export error: {0}")]
    Export(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApplisterError {
    /// Create a "not found" error for backup records
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for installed apps
    pub fn app_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "App",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for settings keys
    pub fn setting_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Setting",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for ApplisterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ApplisterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for applister operations
pub type ApplisterResult<T> = Result<T, ApplisterError>;
