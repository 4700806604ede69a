//! Export CLI command
//!
//! Writes a formatted app list without recording it as a backup.

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Args;

use crate::config::paths::ApplisterPaths;
use crate::config::settings::Settings;
use crate::error::{ApplisterError, ApplisterResult};
use crate::export::{format_apps, ExportContext};
use crate::models::{AppRecord, BackupFormat, FilterMode, SortMode};
use crate::registry::PackageRegistry;
use crate::storage::write_text_atomic;

use super::list::build_list_state;
use super::{open_registry, parse_filter, parse_format, parse_sort};

/// Options for exporting the app list
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output format: markdown, text, json, html
    #[arg(long, value_parser = parse_format)]
    pub format: Option<BackupFormat>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Which apps to include: all, user, system
    #[arg(short, long, value_parser = parse_filter)]
    pub filter: Option<FilterMode>,

    /// Sort order, e.g. name, size, installed, package
    #[arg(short, long, value_parser = parse_sort)]
    pub sort: Option<SortMode>,

    /// Only include apps whose name or package contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Only include these packages (repeatable)
    #[arg(short, long = "package")]
    pub packages: Vec<String>,
}

/// Pick the apps an export or backup should contain
///
/// With packages given, they become the selection over the full installed
/// list, ignoring any filter or search; every one must be installed.
pub(crate) fn select_apps(
    settings: &Settings,
    apps: Vec<AppRecord>,
    filter: Option<FilterMode>,
    sort: Option<SortMode>,
    search: Option<&str>,
    packages: &[String],
) -> ApplisterResult<Vec<AppRecord>> {
    if let Some(unknown) = packages
        .iter()
        .find(|p| !apps.iter().any(|a| &a.package_name == *p))
    {
        return Err(ApplisterError::app_not_found(unknown.as_str()));
    }

    if packages.is_empty() {
        return Ok(build_list_state(settings, apps, filter, sort, search).apps_for_export());
    }

    let mut state = build_list_state(settings, apps, Some(FilterMode::All), sort, None);
    state.enter_selection_mode();
    for package in packages {
        if !state.selected_packages().contains(package) {
            state.toggle_selection(package);
        }
    }

    Ok(state.apps_for_export())
}

/// Handle the export command
pub fn handle_export_command(
    paths: &ApplisterPaths,
    settings: &Settings,
    inventory: Option<&Path>,
    args: ExportArgs,
) -> ApplisterResult<()> {
    let registry = open_registry(paths, inventory)?;
    let apps = select_apps(
        settings,
        registry.installed_apps()?,
        args.filter,
        args.sort,
        args.search.as_deref(),
        &args.packages,
    )?;

    let format = args.format.unwrap_or(settings.default_export_format);
    let ctx = ExportContext::new(Utc::now().timestamp_millis(), registry.device_info());
    let formatted = format_apps(&apps, format, &ctx)?;

    match args.output {
        Some(path) => {
            write_text_atomic(&path, &formatted.content)?;
            println!(
                "Exported {} apps as {} ({}) to {}",
                apps.len(),
                format,
                formatted.mime_type(),
                path.display()
            );
        }
        None => print!("{}", formatted.content),
    }

    Ok(())
}
