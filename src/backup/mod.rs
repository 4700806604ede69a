//! Backup store and restore engine
//!
//! - `BackupManager` writes formatted app lists to the backup directory,
//!   records them in the metadata table and caps automatic backups.
//! - `RestoreEngine` compares a JSON backup bundle with the installed
//!   packages and reports what is found and what is missing.
//!
//! # Example
//!
//! ```rust,ignore
//! use applister::backup::{BackupManager, RestoreEngine};
//! use applister::config::ApplisterPaths;
//! use applister::models::BackupFormat;
//! use applister::registry::{PackageRegistry, SnapshotRegistry};
//!
//! let paths = ApplisterPaths::new()?;
//! let registry = SnapshotRegistry::load(&paths.inventory_file())?;
//! let manager = BackupManager::open(&paths, registry.device_info())?;
//!
//! let record = manager.create_backup(&registry.installed_apps()?, BackupFormat::Json, false)?;
//! let result = RestoreEngine::new(&registry).restore_backup(&manager, record.id)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{backup_file_name, BackupManager, Clock, SystemClock, BACKUP_PREFIX, MAX_AUTO_BACKUPS};
pub use restore::RestoreEngine;
