//! Backup store for applister
//!
//! Writes formatted app lists into the backup directory and keeps one
//! metadata row per file. Automatic backups are capped at
//! `MAX_AUTO_BACKUPS`; the oldest are evicted after each automatic backup.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::config::paths::ApplisterPaths;
use crate::config::settings::Settings;
use crate::error::{ApplisterError, ApplisterResult};
use crate::export::{format_apps, ExportContext};
use crate::models::{AppRecord, BackupFormat, DeviceInfo};
use crate::storage::{write_text_atomic, BackupRecord, BackupRecordRepository};

/// File name prefix shared by every backup
pub const BACKUP_PREFIX: &str = "myapplist-backup";

/// Number of automatic backups kept
pub const MAX_AUTO_BACKUPS: usize = 30;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// The system wall clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Build a backup file name: `{prefix}[-auto]_{yyyy-MM-dd_HH-mm-ss}.{ext}`
///
/// Names have second resolution, so two backups of the same kind created
/// within one second share a name and the later one overwrites the file.
pub fn backup_file_name(timestamp: &DateTime<Local>, format: BackupFormat, is_auto: bool) -> String {
    let prefix = if is_auto {
        format!("{}-auto", BACKUP_PREFIX)
    } else {
        BACKUP_PREFIX.to_string()
    };

    format!(
        "{}_{}.{}",
        prefix,
        timestamp.format("%Y-%m-%d_%H-%M-%S"),
        format.extension()
    )
}

/// Manages backup files and their metadata
pub struct BackupManager {
    /// Directory the backup files are written to
    backup_dir: PathBuf,
    records: BackupRecordRepository,
    /// Device the backed up lists come from
    device: DeviceInfo,
    clock: Box<dyn Clock>,
}

impl BackupManager {
    /// Create a manager over an already loaded metadata table
    pub fn new(backup_dir: PathBuf, records: BackupRecordRepository, device: DeviceInfo) -> Self {
        Self {
            backup_dir,
            records,
            device,
            clock: Box::new(SystemClock),
        }
    }

    /// Open the backup store under the applister data directory
    pub fn open(paths: &ApplisterPaths, device: DeviceInfo) -> ApplisterResult<Self> {
        let records = BackupRecordRepository::new(paths.backup_records_file());
        records.load()?;

        Ok(Self::new(paths.backup_dir(), records, device))
    }

    /// Replace the clock used for timestamps and file names
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn backup_dir(&self) -> &PathBuf {
        &self.backup_dir
    }

    /// Format `apps`, write the file and record it
    ///
    /// Nothing is recorded unless the file was written. After an automatic
    /// backup, automatic backups beyond the cap are evicted.
    pub fn create_backup(
        &self,
        apps: &[AppRecord],
        format: BackupFormat,
        is_auto: bool,
    ) -> ApplisterResult<BackupRecord> {
        let now = self.clock.now();
        let file_name = backup_file_name(&now, format, is_auto);

        let ctx = ExportContext::new(now.timestamp_millis(), self.device.clone());
        let formatted = format_apps(apps, format, &ctx)?;

        let path = self.backup_dir.join(&file_name);
        write_text_atomic(&path, &formatted.content)
            .map_err(|e| ApplisterError::Backup(format!("Failed to write {}: {}", file_name, e)))?;
        let file_path = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());

        let record = BackupRecord {
            id: 0,
            file_name,
            file_path,
            created_at: now.timestamp_millis(),
            app_count: apps.len(),
            format: format.label().to_string(),
            is_auto_backup: is_auto,
        };
        let record = self
            .records
            .insert(record)
            .inspect_err(|_| remove_backup_file(&path))?;

        info!(
            id = record.id,
            file = %record.file_name,
            apps = record.app_count,
            auto = is_auto,
            "backup created"
        );

        if is_auto {
            if let Err(e) = self.enforce_auto_retention() {
                warn!(error = %e, "failed to prune automatic backups");
            }
        }

        Ok(record)
    }

    /// Create an automatic backup when enabled in `settings`
    ///
    /// Returns `None` when automatic backups are off or there is nothing to
    /// back up.
    pub fn auto_backup_if_enabled(
        &self,
        settings: &Settings,
        apps: &[AppRecord],
    ) -> ApplisterResult<Option<BackupRecord>> {
        if !settings.auto_backup {
            return Ok(None);
        }
        if apps.is_empty() {
            debug!("skipping automatic backup of an empty list");
            return Ok(None);
        }

        self.create_backup(apps, settings.auto_backup_format, true)
            .map(Some)
    }

    /// Evict automatic backups beyond `MAX_AUTO_BACKUPS`, oldest first
    ///
    /// Rows are removed even when their file cannot be deleted.
    pub fn enforce_auto_retention(&self) -> ApplisterResult<Vec<BackupRecord>> {
        let evicted: Vec<BackupRecord> = self
            .records
            .get_auto_backups()?
            .into_iter()
            .skip(MAX_AUTO_BACKUPS)
            .collect();

        if evicted.is_empty() {
            return Ok(evicted);
        }

        for record in &evicted {
            remove_backup_file(&record.file_path);
        }

        let ids: Vec<u64> = evicted.iter().map(|r| r.id).collect();
        self.records.delete_by_ids(&ids)?;

        info!(count = evicted.len(), "evicted old automatic backups");
        Ok(evicted)
    }

    /// Delete a backup's file and its row
    ///
    /// A file that cannot be removed is logged and otherwise ignored.
    pub fn delete_backup(&self, record: &BackupRecord) -> ApplisterResult<()> {
        remove_backup_file(&record.file_path);
        self.records.delete(record.id)?;

        info!(id = record.id, file = %record.file_name, "backup deleted");
        Ok(())
    }

    /// Delete a backup by id
    pub fn delete_backup_by_id(&self, id: u64) -> ApplisterResult<BackupRecord> {
        let record = self
            .get_backup(id)?
            .ok_or_else(|| ApplisterError::backup_not_found(id.to_string()))?;

        self.delete_backup(&record)?;
        Ok(record)
    }

    /// All backups, newest first
    pub fn list_backups(&self) -> ApplisterResult<Vec<BackupRecord>> {
        self.records.get_all()
    }

    pub fn get_backup(&self, id: u64) -> ApplisterResult<Option<BackupRecord>> {
        self.records.get(id)
    }

    /// The most recently created backup
    pub fn latest_backup(&self) -> ApplisterResult<Option<BackupRecord>> {
        Ok(self.records.get_all()?.into_iter().next())
    }

    /// Read a backup file's content; `None` if the file no longer exists
    pub fn read_backup_content(&self, record: &BackupRecord) -> ApplisterResult<Option<String>> {
        match fs::read_to_string(&record.file_path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(file = %record.file_path.display(), "backup file is missing");
                Ok(None)
            }
            Err(e) => Err(ApplisterError::Io(format!(
                "Failed to read {}: {}",
                record.file_path.display(),
                e
            ))),
        }
    }
}

fn remove_backup_file(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!(file = %path.display(), "removed backup file"),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(file = %path.display(), "backup file already gone")
        }
        Err(e) => warn!(file = %path.display(), error = %e, "failed to remove backup file"),
    }
}
