//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the library.

pub mod backup;
pub mod export;
pub mod list;
pub mod restore;
pub mod settings;
pub mod store;

use std::path::Path;

use tracing::debug;

use crate::config::paths::ApplisterPaths;
use crate::error::ApplisterResult;
use crate::models::{AppStore, BackupFormat, FilterMode, SortMode};
use crate::registry::SnapshotRegistry;

pub use backup::{handle_backup_command, BackupCommands};
pub use export::{handle_export_command, ExportArgs};
pub use list::{handle_list_command, ListArgs};
pub use restore::{handle_restore_command, RestoreArgs};
pub use settings::{handle_settings_command, SettingsCommands};
pub use store::{handle_store_command, StoreCommands};

/// Open the device inventory, defaulting to the one in the data directory
pub fn open_registry(
    paths: &ApplisterPaths,
    inventory: Option<&Path>,
) -> ApplisterResult<SnapshotRegistry> {
    let path = match inventory {
        Some(path) => path.to_path_buf(),
        None => paths.inventory_file(),
    };

    debug!(inventory = %path.display(), "opening package inventory");
    SnapshotRegistry::load(&path)
}

pub(crate) fn parse_filter(s: &str) -> Result<FilterMode, String> {
    FilterMode::parse(s).ok_or_else(|| {
        format!("unknown filter '{}', expected one of: all, user, system", s)
    })
}

pub(crate) fn parse_sort(s: &str) -> Result<SortMode, String> {
    SortMode::parse(s).ok_or_else(|| {
        format!(
            "unknown sort '{}', expected one of: name, name-desc, installed, installed-oldest, \
             updated, updated-oldest, size, size-smallest, package",
            s
        )
    })
}

pub(crate) fn parse_format(s: &str) -> Result<BackupFormat, String> {
    BackupFormat::parse(s).ok_or_else(|| {
        format!("unknown format '{}', expected one of: markdown, text, json, html", s)
    })
}

pub(crate) fn parse_store(s: &str) -> Result<AppStore, String> {
    AppStore::parse(s).ok_or_else(|| {
        format!(
            "unknown store '{}', expected one of: play, fdroid, amazon, samsung, huawei",
            s
        )
    })
}
