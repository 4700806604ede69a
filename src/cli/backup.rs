//! Backup CLI commands
//!
//! Implements CLI commands for backup management.

use std::path::Path;

use clap::Subcommand;

use crate::backup::{BackupManager, MAX_AUTO_BACKUPS};
use crate::config::paths::ApplisterPaths;
use crate::config::settings::Settings;
use crate::display::{format_backup_details, format_backup_list};
use crate::error::{ApplisterError, ApplisterResult};
use crate::models::{BackupFormat, DeviceInfo};
use crate::registry::PackageRegistry;

use super::export::select_apps;
use super::{open_registry, parse_format};

/// Backup subcommands
#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Back up the installed app list
    Create {
        /// Backup format: markdown, text, json, html
        #[arg(long, value_parser = parse_format)]
        format: Option<BackupFormat>,

        /// Record as an automatic backup (subject to retention)
        #[arg(long)]
        auto: bool,

        /// Only back up these packages (repeatable)
        #[arg(short, long = "package")]
        packages: Vec<String>,
    },

    /// List all backups, newest first
    List,

    /// Show information about a backup
    Show {
        /// Backup id
        id: u64,

        /// Print the backup file's content
        #[arg(long)]
        content: bool,
    },

    /// Delete a backup and its file
    Delete {
        /// Backup id
        id: u64,
    },

    /// Remove automatic backups beyond the retention limit
    Prune,
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &ApplisterPaths,
    settings: &Settings,
    inventory: Option<&Path>,
    cmd: BackupCommands,
) -> ApplisterResult<()> {
    match cmd {
        BackupCommands::Create {
            format,
            auto,
            packages,
        } => {
            let registry = open_registry(paths, inventory)?;
            let manager = BackupManager::open(paths, registry.device_info())?;

            let apps = select_apps(
                settings,
                registry.installed_apps()?,
                None,
                None,
                None,
                &packages,
            )?;
            let format = format.unwrap_or(if auto {
                settings.auto_backup_format
            } else {
                settings.default_export_format
            });

            let record = manager.create_backup(&apps, format, auto)?;
            println!("Backup created: {}", record.file_name);
            println!("  ID:       {}", record.id);
            println!("  Apps:     {}", record.app_count);
            println!("  Location: {}", record.file_path.display());
        }

        BackupCommands::List => {
            let manager = BackupManager::open(paths, DeviceInfo::default())?;
            let backups = manager.list_backups()?;

            println!("{}", format_backup_list(&backups));
            if backups.is_empty() {
                println!("Create one with: applister backup create");
            } else {
                println!("Total: {} backup(s)", backups.len());
            }
        }

        BackupCommands::Show { id, content } => {
            let manager = BackupManager::open(paths, DeviceInfo::default())?;
            let record = manager
                .get_backup(id)?
                .ok_or_else(|| ApplisterError::backup_not_found(id.to_string()))?;

            print!("{}", format_backup_details(&record));

            match manager.read_backup_content(&record)? {
                Some(text) if content => {
                    println!();
                    print!("{}", text);
                }
                Some(_) => {}
                None => println!("  Warning: the backup file no longer exists"),
            }
        }

        BackupCommands::Delete { id } => {
            let manager = BackupManager::open(paths, DeviceInfo::default())?;
            let record = manager.delete_backup_by_id(id)?;
            println!("Deleted backup {} ({})", record.id, record.file_name);
        }

        BackupCommands::Prune => {
            let manager = BackupManager::open(paths, DeviceInfo::default())?;
            let evicted = manager.enforce_auto_retention()?;

            if evicted.is_empty() {
                println!(
                    "Nothing to prune; at most {} automatic backups are kept.",
                    MAX_AUTO_BACKUPS
                );
            } else {
                println!("Removed {} old automatic backup(s):", evicted.len());
                for record in &evicted {
                    println!("  {}", record.file_name);
                }
            }
        }
    }

    Ok(())
}
