//! List CLI command
//!
//! Shows the installed apps. Running it counts as starting the app, so an
//! automatic backup is taken first when enabled.

use clap::Args;
use tracing::{info, warn};

use crate::backup::BackupManager;
use crate::config::paths::ApplisterPaths;
use crate::config::settings::Settings;
use crate::display::{format_app_table, format_counts};
use crate::error::ApplisterResult;
use crate::models::{AppRecord, FilterMode, SortMode};
use crate::registry::PackageRegistry;
use crate::services::{sort_apps, AppListState};

use super::{parse_filter, parse_sort};

/// Options for listing installed apps
#[derive(Args, Debug, Default)]
pub struct ListArgs {
    /// Which apps to show: all, user, system
    #[arg(short, long, value_parser = parse_filter)]
    pub filter: Option<FilterMode>,

    /// Sort order, e.g. name, size, installed, package
    #[arg(short, long, value_parser = parse_sort)]
    pub sort: Option<SortMode>,

    /// Only show apps whose name or package contains this text
    #[arg(long)]
    pub search: Option<String>,

    /// Print the list as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the automatic backup even when enabled
    #[arg(long)]
    pub no_auto_backup: bool,
}

/// Build list state over `apps`, with settings defaults unless overridden
pub(crate) fn build_list_state(
    settings: &Settings,
    apps: Vec<AppRecord>,
    filter: Option<FilterMode>,
    sort: Option<SortMode>,
    search: Option<&str>,
) -> AppListState {
    let mut state = AppListState::from_settings(settings);
    if let Some(filter) = filter {
        state.set_filter_mode(filter);
    }
    if let Some(sort) = sort {
        state.set_sort_mode(sort);
    }
    if let Some(query) = search {
        state.set_query(query);
    }
    state.set_apps(apps);
    state
}

/// Handle the list command
pub fn handle_list_command(
    paths: &ApplisterPaths,
    settings: &Settings,
    registry: &dyn PackageRegistry,
    args: ListArgs,
) -> ApplisterResult<()> {
    let apps = registry.installed_apps()?;

    if settings.auto_backup && !args.no_auto_backup {
        let manager = BackupManager::open(paths, registry.device_info())?;
        let ordered = sort_apps(&apps, settings.default_sort);

        match manager.auto_backup_if_enabled(settings, &ordered) {
            Ok(Some(record)) => info!(file = %record.file_name, "automatic backup created"),
            Ok(None) => {}
            Err(e) => warn!(error = %e, "automatic backup failed"),
        }
    }

    let state = build_list_state(
        settings,
        apps,
        args.filter,
        args.sort,
        args.search.as_deref(),
    );
    let visible = state.apps();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&visible)?);
        return Ok(());
    }

    println!("{}", format_app_table(&visible, settings));
    println!("{}", format_counts(visible.len(), &state.counts()));

    Ok(())
}
