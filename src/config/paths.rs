//! Path management for applister
//!
//! ## Path Resolution Order
//!
//! 1. `APPLISTER_DATA_DIR` environment variable (if set)
//! 2. The platform data directory reported by `directories`
//!    (e.g. `~/.local/share/applister` on Linux)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::ApplisterError;

/// Directory name for backup files, relative to the base directory
pub const BACKUP_DIR: &str = "backups";

/// Manages all paths used by applister
#[derive(Debug, Clone)]
pub struct ApplisterPaths {
    /// Base directory for all applister data
    base_dir: PathBuf,
}

impl ApplisterPaths {
    /// Create a new ApplisterPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and no
    /// override is set.
    pub fn new() -> Result<Self, ApplisterError> {
        let base_dir = match std::env::var_os("APPLISTER_DATA_DIR") {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create ApplisterPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the backup files themselves
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join(BACKUP_DIR)
    }

    /// Path to the settings document
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    /// Path to the backup metadata table
    pub fn backup_records_file(&self) -> PathBuf {
        self.base_dir.join("backup_records.json")
    }

    /// Default location of the device package inventory
    pub fn inventory_file(&self) -> PathBuf {
        self.base_dir.join("inventory.json")
    }

    /// Ensure the base and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), ApplisterError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| ApplisterError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir()).map_err(|e| {
            ApplisterError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        Ok(())
    }
}

fn resolve_default_path() -> Result<PathBuf, ApplisterError> {
    ProjectDirs::from("app", "applister", "applister")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| ApplisterError::Config("Could not determine a data directory".into()))
}
