//! Restore results
//!
//! A restore never alters the device; it only reports which entries of a
//! backup bundle are installed and which are missing.

use serde::Serialize;

use super::backup::BackupEntry;

/// One bundle entry as seen by a restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoredApp {
    pub package_name: String,
    pub app_name: String,
    /// Version recorded in the backup, not the installed one
    pub version_in_backup: Option<String>,
}

impl From<&BackupEntry> for RestoredApp {
    fn from(entry: &BackupEntry) -> Self {
        Self {
            package_name: entry.package_name.clone(),
            app_name: entry.app_name.clone(),
            version_in_backup: entry.version_name.clone(),
        }
    }
}

/// Outcome of matching a backup bundle against installed packages
///
/// `total_apps == found_apps.len() + missing_apps.len()`, and both lists keep
/// the bundle's entry order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct RestoreResult {
    pub total_apps: usize,
    pub found_apps: Vec<RestoredApp>,
    pub missing_apps: Vec<RestoredApp>,
}

impl RestoreResult {
    /// True when every app in the backup is already installed
    pub fn is_complete(&self) -> bool {
        self.missing_apps.is_empty()
    }

    /// Get a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} apps in backup: {} installed, {} missing",
            self.total_apps,
            self.found_apps.len(),
            self.missing_apps.len()
        )
    }
}
