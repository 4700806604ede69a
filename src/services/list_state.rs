//! Observable app list state
//!
//! Holds the raw app list and every input of the list transformer (query,
//! sort, filter, selection). Each mutation recomputes the visible list and
//! publishes it on a `watch` channel, so consumers always see a list derived
//! from the latest inputs.

use std::collections::BTreeSet;

use tokio::sync::watch;
use tracing::debug;

use crate::config::Settings;
use crate::models::{AppRecord, FilterMode, SortMode};

use super::transform::transform;

/// Totals over the raw, unfiltered list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppCounts {
    pub total: usize,
    pub user: usize,
    pub system: usize,
}

/// Inputs and derived output of the app list
pub struct AppListState {
    all_apps: Vec<AppRecord>,
    query: String,
    sort_mode: SortMode,
    filter_mode: FilterMode,
    selection_mode: bool,
    selected: BTreeSet<String>,
    visible: watch::Sender<Vec<AppRecord>>,
}

impl AppListState {
    pub fn new(filter_mode: FilterMode, sort_mode: SortMode) -> Self {
        let (visible, _) = watch::channel(Vec::new());
        Self {
            all_apps: Vec::new(),
            query: String::new(),
            sort_mode,
            filter_mode,
            selection_mode: false,
            selected: BTreeSet::new(),
            visible,
        }
    }

    /// Start from the user's default sort and filter
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.default_filter, settings.default_sort)
    }

    /// Receiver notified whenever the visible list is recomputed
    pub fn subscribe(&self) -> watch::Receiver<Vec<AppRecord>> {
        self.visible.subscribe()
    }

    /// Current visible list
    pub fn apps(&self) -> Vec<AppRecord> {
        self.visible.borrow().clone()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn is_selection_mode(&self) -> bool {
        self.selection_mode
    }

    pub fn selected_packages(&self) -> &BTreeSet<String> {
        &self.selected
    }

    /// Replace the raw list with a fresh enumeration
    pub fn set_apps(&mut self, apps: Vec<AppRecord>) {
        self.all_apps = apps;
        self.recompute();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.recompute();
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.recompute();
    }

    pub fn set_filter_mode(&mut self, mode: FilterMode) {
        self.filter_mode = mode;
        self.recompute();
    }

    pub fn enter_selection_mode(&mut self) {
        self.selection_mode = true;
    }

    /// Leave selection mode and clear the selection
    pub fn exit_selection_mode(&mut self) {
        self.selection_mode = false;
        self.selected.clear();
        self.recompute();
    }

    /// Flip one package's selection; emptying the selection leaves selection mode
    pub fn toggle_selection(&mut self, package_name: &str) {
        if !self.selected.remove(package_name) {
            self.selected.insert(package_name.to_string());
            self.selection_mode = true;
        }
        if self.selected.is_empty() {
            self.selection_mode = false;
        }
        self.recompute();
    }

    /// Select every visible app
    pub fn select_all(&mut self) {
        self.selected = self
            .visible
            .borrow()
            .iter()
            .map(|a| a.package_name.clone())
            .collect();
        self.recompute();
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
        self.recompute();
    }

    /// Visible apps that are selected, in display order
    pub fn selected_apps(&self) -> Vec<AppRecord> {
        self.visible
            .borrow()
            .iter()
            .filter(|a| self.selected.contains(&a.package_name))
            .cloned()
            .collect()
    }

    /// Apps a backup or export should contain
    ///
    /// The selection when selection mode is active and non-empty, otherwise
    /// the whole visible list.
    pub fn apps_for_export(&self) -> Vec<AppRecord> {
        if self.selection_mode && !self.selected.is_empty() {
            self.selected_apps()
        } else {
            self.apps()
        }
    }

    /// Totals over the raw list, ignoring filter and search
    pub fn counts(&self) -> AppCounts {
        let system = self.all_apps.iter().filter(|a| a.is_system_app).count();
        AppCounts {
            total: self.all_apps.len(),
            user: self.all_apps.len() - system,
            system,
        }
    }

    fn recompute(&mut self) {
        let mut visible = transform(&self.all_apps, self.filter_mode, &self.query, self.sort_mode);
        for app in &mut visible {
            app.is_selected = self.selected.contains(&app.package_name);
        }

        debug!(
            visible = visible.len(),
            total = self.all_apps.len(),
            "app list recomputed"
        );
        self.visible.send_replace(visible);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_apps() -> AppListState {
        let mut state = AppListState::new(FilterMode::All, SortMode::NameAsc);
        state.set_apps(vec![
            AppRecord::new("org.example.maps", "Maps").with_size(10),
            AppRecord::new("com.android.settings", "Settings").system().with_size(40),
            AppRecord::new("org.example.camera", "Camera").with_size(30),
        ]);
        state
    }

    fn names(apps: &[AppRecord]) -> Vec<String> {
        apps.iter().map(|a| a.app_name.clone()).collect()
    }

    #[test]
    fn test_recomputes_on_every_input_change() {
        let mut state = state_with_apps();
        let mut receiver = state.subscribe();
        assert_eq!(names(&state.apps()), vec!["Camera", "Maps", "Settings"]);

        state.set_filter_mode(FilterMode::UserOnly);
        assert!(receiver.has_changed().unwrap());
        assert_eq!(names(&receiver.borrow_and_update()), vec!["Camera", "Maps"]);

        state.set_sort_mode(SortMode::SizeSmallest);
        assert_eq!(names(&state.apps()), vec!["Maps", "Camera"]);

        state.set_query("cam");
        assert_eq!(names(&state.apps()), vec!["Camera"]);
        assert_eq!(state.query(), "cam");
    }

    #[test]
    fn test_from_settings_uses_defaults() {
        let mut settings = Settings::default();
        settings.default_filter = FilterMode::SystemOnly;
        settings.default_sort = SortMode::SizeLargest;

        let state = AppListState::from_settings(&settings);
        assert_eq!(state.filter_mode(), FilterMode::SystemOnly);
        assert_eq!(state.sort_mode(), SortMode::SizeLargest);
    }

    #[test]
    fn test_selection_marks_records() {
        let mut state = state_with_apps();

        state.toggle_selection("org.example.maps");
        assert!(state.is_selection_mode());

        let apps = state.apps();
        let maps = apps.iter().find(|a| a.package_name == "org.example.maps").unwrap();
        assert!(maps.is_selected);
        assert_eq!(apps.iter().filter(|a| a.is_selected).count(), 1);

        state.toggle_selection("org.example.maps");
        assert!(!state.is_selection_mode());
        assert!(state.selected_packages().is_empty());
    }

    #[test]
    fn test_select_all_uses_visible_list() {
        let mut state = state_with_apps();
        state.set_filter_mode(FilterMode::UserOnly);
        state.enter_selection_mode();
        state.select_all();

        assert_eq!(state.selected_packages().len(), 2);
        assert_eq!(names(&state.selected_apps()), vec!["Camera", "Maps"]);

        state.deselect_all();
        assert!(state.selected_apps().is_empty());
    }

    #[test]
    fn test_apps_for_export() {
        let mut state = state_with_apps();
        assert_eq!(state.apps_for_export().len(), 3);

        state.toggle_selection("com.android.settings");
        assert_eq!(names(&state.apps_for_export()), vec!["Settings"]);

        state.exit_selection_mode();
        assert_eq!(state.apps_for_export().len(), 3);
        assert!(state.apps().iter().all(|a| !a.is_selected));
    }

    #[test]
    fn test_counts_ignore_filter() {
        let mut state = state_with_apps();
        state.set_filter_mode(FilterMode::SystemOnly);
        state.set_query("nothing matches this");

        assert_eq!(
            state.counts(),
            AppCounts {
                total: 3,
                user: 2,
                system: 1
            }
        );
    }
}
