//! Restore engine for applister
//!
//! Matches the entries of a JSON backup bundle against the packages that are
//! currently installed. Nothing on the device is changed; missing apps are
//! reinstalled by the user through store links.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{ApplisterError, ApplisterResult};
use crate::export::parse_bundle;
use crate::models::{BackupBundle, BackupFormat, RestoreResult, RestoredApp};
use crate::registry::PackageRegistry;

use super::manager::BackupManager;

/// Compares backup bundles with a package registry
pub struct RestoreEngine<'a> {
    registry: &'a dyn PackageRegistry,
}

impl<'a> RestoreEngine<'a> {
    pub fn new(registry: &'a dyn PackageRegistry) -> Self {
        Self { registry }
    }

    /// Restore from bundle JSON
    ///
    /// Fails as a whole if the text is not a backup bundle.
    pub fn restore(&self, json: &str) -> ApplisterResult<RestoreResult> {
        let bundle = parse_bundle(json)?;
        Ok(self.restore_bundle(&bundle))
    }

    /// Split a bundle's entries into installed and missing, keeping their order
    pub fn restore_bundle(&self, bundle: &BackupBundle) -> RestoreResult {
        let (found_apps, missing_apps): (Vec<RestoredApp>, Vec<RestoredApp>) = bundle
            .apps
            .iter()
            .map(RestoredApp::from)
            .partition(|app| self.registry.is_installed(&app.package_name));

        let result = RestoreResult {
            total_apps: bundle.apps.len(),
            found_apps,
            missing_apps,
        };

        info!(
            total = result.total_apps,
            found = result.found_apps.len(),
            missing = result.missing_apps.len(),
            "restore matched"
        );
        result
    }

    /// Restore from a bundle file on disk
    pub fn restore_from_file(&self, path: &Path) -> ApplisterResult<RestoreResult> {
        let contents = fs::read_to_string(path).map_err(|e| {
            ApplisterError::Io(format!("Failed to read {}: {}", path.display(), e))
        })?;

        self.restore(&contents)
    }

    /// Restore from a recorded backup
    ///
    /// Only JSON backups can be restored.
    pub fn restore_backup(&self, manager: &BackupManager, id: u64) -> ApplisterResult<RestoreResult> {
        let record = manager
            .get_backup(id)?
            .ok_or_else(|| ApplisterError::backup_not_found(id.to_string()))?;

        if !BackupFormat::from_label(&record.format).is_restorable() {
            return Err(ApplisterError::Validation(format!(
                "Backup {} is {}; only JSON backups can be restored",
                id, record.format
            )));
        }

        let contents = manager.read_backup_content(&record)?.ok_or_else(|| {
            ApplisterError::Restore(format!(
                "Backup file {} no longer exists",
                record.file_path.display()
            ))
        })?;

        self.restore(&contents)
    }
}
