//! Restore CLI command

use std::path::{Path, PathBuf};

use clap::Args;

use crate::backup::{BackupManager, RestoreEngine};
use crate::config::paths::ApplisterPaths;
use crate::config::settings::Settings;
use crate::display::format_restore_result;
use crate::error::{ApplisterError, ApplisterResult};
use crate::models::AppStore;
use crate::registry::PackageRegistry;

use super::{open_registry, parse_store};

/// Options for restoring from a backup
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// JSON backup file to compare with the installed apps
    #[arg(required_unless_present = "backup", conflicts_with = "backup")]
    pub file: Option<PathBuf>,

    /// Restore a recorded backup by id instead of a file
    #[arg(long)]
    pub backup: Option<u64>,

    /// Store used for reinstall links (defaults to the preferred store)
    #[arg(long, value_parser = parse_store)]
    pub store: Option<AppStore>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Handle the restore command
pub fn handle_restore_command(
    paths: &ApplisterPaths,
    settings: &Settings,
    inventory: Option<&Path>,
    args: RestoreArgs,
) -> ApplisterResult<()> {
    let registry = open_registry(paths, inventory)?;
    let engine = RestoreEngine::new(&registry);

    let result = match (&args.file, args.backup) {
        (Some(file), _) => engine.restore_from_file(file)?,
        (None, Some(id)) => {
            let manager = BackupManager::open(paths, registry.device_info())?;
            engine.restore_backup(&manager, id)?
        }
        (None, None) => {
            return Err(ApplisterError::Validation(
                "Give a backup file or --backup <id>".into(),
            ))
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let store = args.store.unwrap_or(settings.preferred_store);
    print!("{}", format_restore_result(&result, store));

    Ok(())
}
