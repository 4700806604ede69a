//! User settings for applister
//!
//! `Settings` is the flat record of user choices. `SETTINGS_SCHEMA` describes
//! each option (key, title, category, allowed values) so front ends can render
//! and edit settings without knowing the struct. `SettingsStore` keeps the
//! current value observable and applies updates atomically.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::watch;
use tracing::{debug, warn};

use super::paths::ApplisterPaths;
use crate::error::{ApplisterError, ApplisterResult};
use crate::models::{AppStore, BackupFormat, FilterMode, SortMode, ThemeMode};
use crate::storage::write_json_atomic;

/// Group a setting is shown under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingCategory {
    General,
    Appearance,
    Backup,
}

impl SettingCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::General => "General",
            Self::Appearance => "Appearance",
            Self::Backup => "Backup",
        }
    }
}

/// How a setting is edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Toggle,
    /// One of a fixed list of options, stored by index
    Dropdown { options: &'static [&'static str] },
}

/// Static description of one user-facing setting
#[derive(Debug, Clone, Copy)]
pub struct SettingDescriptor {
    pub key: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub category: SettingCategory,
    pub kind: SettingKind,
}

const SORT_OPTIONS: &[&str] = &[
    "Name (A→Z)",
    "Name (Z→A)",
    "Install Date (Newest)",
    "Install Date (Oldest)",
    "Updated (Newest)",
    "Updated (Oldest)",
    "Size (Largest)",
    "Size (Smallest)",
    "Package Name",
];
const FILTER_OPTIONS: &[&str] = &["All Apps", "User Apps", "System Apps"];
const STORE_OPTIONS: &[&str] = &[
    "Google Play",
    "F-Droid",
    "Amazon Appstore",
    "Galaxy Store",
    "AppGallery",
];
const THEME_OPTIONS: &[&str] = &["System", "Light", "Dark"];
const FORMAT_OPTIONS: &[&str] = &["Markdown", "Plain Text", "JSON", "HTML"];

/// Every user-facing setting, in display order
pub const SETTINGS_SCHEMA: &[SettingDescriptor] = &[
    SettingDescriptor {
        key: "default_sort",
        title: "Default Sort",
        description: "Default sorting order for app list",
        category: SettingCategory::General,
        kind: SettingKind::Dropdown {
            options: SORT_OPTIONS,
        },
    },
    SettingDescriptor {
        key: "default_filter",
        title: "Default Filter",
        description: "Which apps to show by default",
        category: SettingCategory::General,
        kind: SettingKind::Dropdown {
            options: FILTER_OPTIONS,
        },
    },
    SettingDescriptor {
        key: "preferred_store",
        title: "Preferred app store",
        description: "Store to open when getting apps",
        category: SettingCategory::General,
        kind: SettingKind::Dropdown {
            options: STORE_OPTIONS,
        },
    },
    SettingDescriptor {
        key: "show_package_name",
        title: "Show package name",
        description: "Show package name under app name in the list",
        category: SettingCategory::General,
        kind: SettingKind::Toggle,
    },
    SettingDescriptor {
        key: "show_app_size",
        title: "Show app size",
        description: "Show APK size in the list",
        category: SettingCategory::General,
        kind: SettingKind::Toggle,
    },
    SettingDescriptor {
        key: "default_export_format",
        title: "Default Export Format",
        description: "Default format when exporting manually",
        category: SettingCategory::General,
        kind: SettingKind::Dropdown {
            options: FORMAT_OPTIONS,
        },
    },
    SettingDescriptor {
        key: "theme_mode",
        title: "Theme",
        description: "Color scheme of the interface",
        category: SettingCategory::Appearance,
        kind: SettingKind::Dropdown {
            options: THEME_OPTIONS,
        },
    },
    SettingDescriptor {
        key: "auto_backup",
        title: "Auto Backup",
        description: "Automatically backup app list when opening the app",
        category: SettingCategory::Backup,
        kind: SettingKind::Toggle,
    },
    SettingDescriptor {
        key: "auto_backup_format",
        title: "Auto Backup Format",
        description: "File format for automatic backups",
        category: SettingCategory::Backup,
        kind: SettingKind::Dropdown {
            options: FORMAT_OPTIONS,
        },
    },
];

/// Look up a setting's descriptor by key
pub fn descriptor(key: &str) -> Option<&'static SettingDescriptor> {
    SETTINGS_SCHEMA.iter().find(|d| d.key == key)
}

/// User settings for applister
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Schema version for migration support
    pub schema_version: u32,
    pub default_sort: SortMode,
    pub default_filter: FilterMode,
    pub preferred_store: AppStore,
    pub show_package_name: bool,
    pub show_app_size: bool,
    pub theme_mode: ThemeMode,
    pub auto_backup: bool,
    pub auto_backup_format: BackupFormat,
    pub default_export_format: BackupFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: 1,
            default_sort: SortMode::NameAsc,
            default_filter: FilterMode::All,
            preferred_store: AppStore::PlayStore,
            show_package_name: true,
            show_app_size: false,
            theme_mode: ThemeMode::System,
            auto_backup: false,
            auto_backup_format: BackupFormat::Json,
            default_export_format: BackupFormat::Json,
        }
    }
}

impl Settings {
    /// Build settings from a stored JSON document
    ///
    /// Fields that are missing or hold a value of the wrong shape fall back to
    /// their defaults one by one; unknown keys are dropped.
    pub fn from_json_value(stored: Value) -> Self {
        let defaults = Settings::default();

        let Value::Object(stored) = stored else {
            warn!("settings document is not an object, using defaults");
            return defaults;
        };
        let Ok(Value::Object(mut merged)) = serde_json::to_value(&defaults) else {
            return defaults;
        };

        for (key, candidate) in stored {
            if !merged.contains_key(&key) {
                continue;
            }

            let mut trial = merged.clone();
            trial.insert(key.clone(), candidate.clone());
            if serde_json::from_value::<Settings>(Value::Object(trial)).is_ok() {
                merged.insert(key, candidate);
            } else {
                debug!(key = %key, "ignoring unreadable setting value");
            }
        }

        serde_json::from_value(Value::Object(merged)).unwrap_or(defaults)
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ApplisterPaths) -> ApplisterResult<Self> {
        Self::load_from(&paths.settings_file())
    }

    fn load_from(path: &Path) -> ApplisterResult<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ApplisterError::Io(format!("Failed to read settings file: {}", e)))?;

        match serde_json::from_str::<Value>(&contents) {
            Ok(value) => Ok(Self::from_json_value(value)),
            Err(e) => {
                warn!(error = %e, "settings file is corrupted, using defaults");
                Ok(Settings::default())
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ApplisterPaths) -> ApplisterResult<()> {
        write_json_atomic(paths.settings_file(), self)
    }

    /// Current option index of a dropdown setting
    pub fn option_index(&self, key: &str) -> Option<usize> {
        match key {
            "default_sort" => Some(self.default_sort.index()),
            "default_filter" => Some(self.default_filter.index()),
            "preferred_store" => Some(self.preferred_store.index()),
            "theme_mode" => Some(self.theme_mode.index()),
            "auto_backup_format" => Some(self.auto_backup_format.index()),
            "default_export_format" => Some(self.default_export_format.index()),
            _ => None,
        }
    }

    /// Current value of a toggle setting
    pub fn toggle(&self, key: &str) -> Option<bool> {
        match key {
            "show_package_name" => Some(self.show_package_name),
            "show_app_size" => Some(self.show_app_size),
            "auto_backup" => Some(self.auto_backup),
            _ => None,
        }
    }

    /// Human-readable value of a setting
    pub fn display_value(&self, key: &str) -> Option<String> {
        let descriptor = descriptor(key)?;
        match descriptor.kind {
            SettingKind::Toggle => self
                .toggle(key)
                .map(|on| if on { "On" } else { "Off" }.to_string()),
            SettingKind::Dropdown { options } => self
                .option_index(key)
                .and_then(|i| options.get(i))
                .map(|s| s.to_string()),
        }
    }

    /// Set a setting from user input
    ///
    /// Toggles accept on/off, true/false, yes/no, 1/0. Dropdowns accept an
    /// option index, an option label, or the value's short name.
    pub fn set_value(&mut self, key: &str, raw: &str) -> ApplisterResult<()> {
        let descriptor = descriptor(key).ok_or_else(|| ApplisterError::setting_not_found(key))?;

        match descriptor.kind {
            SettingKind::Toggle => {
                let on = parse_toggle(raw).ok_or_else(|| {
                    ApplisterError::Validation(format!("'{}' is not a valid on/off value", raw))
                })?;
                match key {
                    "show_package_name" => self.show_package_name = on,
                    "show_app_size" => self.show_app_size = on,
                    "auto_backup" => self.auto_backup = on,
                    _ => return Err(ApplisterError::setting_not_found(key)),
                }
            }
            SettingKind::Dropdown { options } => {
                let index = parse_option(raw, options, key).ok_or_else(|| {
                    ApplisterError::Validation(format!(
                        "'{}' is not a valid value for {}; expected one of: {}",
                        raw,
                        key,
                        options.join(", ")
                    ))
                })?;
                match key {
                    "default_sort" => self.default_sort = SortMode::from_index(index),
                    "default_filter" => self.default_filter = FilterMode::from_index(index),
                    "preferred_store" => self.preferred_store = AppStore::from_index(index),
                    "theme_mode" => self.theme_mode = ThemeMode::from_index(index),
                    "auto_backup_format" => {
                        self.auto_backup_format = BackupFormat::from_index(index)
                    }
                    "default_export_format" => {
                        self.default_export_format = BackupFormat::from_index(index)
                    }
                    _ => return Err(ApplisterError::setting_not_found(key)),
                }
            }
        }

        Ok(())
    }
}

fn parse_toggle(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn parse_option(raw: &str, options: &[&str], key: &str) -> Option<usize> {
    let raw = raw.trim();

    if let Ok(index) = raw.parse::<usize>() {
        return (index < options.len()).then_some(index);
    }

    if let Some(index) = options.iter().position(|o| o.eq_ignore_ascii_case(raw)) {
        return Some(index);
    }

    match key {
        "default_sort" => SortMode::parse(raw).map(|m| m.index()),
        "default_filter" => FilterMode::parse(raw).map(|m| m.index()),
        "preferred_store" => AppStore::parse(raw).map(|s| s.index()),
        "theme_mode" => ThemeMode::parse(raw).map(|t| t.index()),
        "auto_backup_format" | "default_export_format" => {
            BackupFormat::parse(raw).map(|f| f.index())
        }
        _ => None,
    }
}

/// Durable, observable settings
///
/// Readers get the latest committed value through `current` or a `watch`
/// receiver. `update` runs read-modify-write under a lock, persists the
/// result, and only then publishes it; a failed write publishes nothing.
pub struct SettingsStore {
    path: PathBuf,
    write_lock: Mutex<()>,
    sender: watch::Sender<Settings>,
}

impl SettingsStore {
    /// Open the store, reading whatever is on disk
    pub fn open(paths: &ApplisterPaths) -> ApplisterResult<Self> {
        let path = paths.settings_file();
        let settings = Settings::load_from(&path)?;
        let (sender, _) = watch::channel(settings);

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
            sender,
        })
    }

    /// Latest committed settings
    pub fn current(&self) -> Settings {
        self.sender.borrow().clone()
    }

    /// Receiver notified on every committed change
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.sender.subscribe()
    }

    /// Apply `transform` to the latest committed value and persist it
    pub fn update<F>(&self, transform: F) -> ApplisterResult<Settings>
    where
        F: FnOnce(&mut Settings) -> ApplisterResult<()>,
    {
        let _guard = self.write_lock.lock().map_err(|e| {
            ApplisterError::Storage(format!("Failed to acquire settings lock: {}", e))
        })?;

        let mut next = self.current();
        transform(&mut next)?;
        write_json_atomic(&self.path, &next)?;
        self.sender.send_replace(next.clone());

        debug!("settings updated");
        Ok(next)
    }

    /// Restore every setting to its default
    pub fn reset(&self) -> ApplisterResult<Settings> {
        self.update(|settings| {
            *settings = Settings::default();
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_paths() -> (TempDir, ApplisterPaths) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ApplisterPaths::with_base_dir(temp_dir.path().to_path_buf());
        (temp_dir, paths)
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.default_sort, SortMode::NameAsc);
        assert_eq!(settings.default_filter, FilterMode::All);
        assert!(settings.show_package_name);
        assert!(!settings.show_app_size);
        assert!(!settings.auto_backup);
        assert_eq!(settings.auto_backup_format, BackupFormat::Json);
        assert_eq!(settings.default_export_format, BackupFormat::Json);
    }

    #[test]
    fn test_save_and_load() {
        let (_temp, paths) = test_paths();

        let mut settings = Settings::default();
        settings.default_sort = SortMode::SizeLargest;
        settings.auto_backup = true;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_corrupted_field_falls_back_individually() {
        let stored = serde_json::json!({
            "default_sort": "size_largest",
            "default_filter": "sideways",
            "auto_backup": "maybe",
            "show_app_size": true,
            "something_else": 1
        });

        let settings = Settings::from_json_value(stored);
        assert_eq!(settings.default_sort, SortMode::SizeLargest);
        assert_eq!(settings.default_filter, FilterMode::All);
        assert!(!settings.auto_backup);
        assert!(settings.show_app_size);
    }

    #[test]
    fn test_corrupted_file_uses_defaults() {
        let (_temp, paths) = test_paths();
        std::fs::write(paths.settings_file(), "{{{ definitely not json").unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn test_schema_options_match_models() {
        let labels: Vec<_> = SortMode::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels, SORT_OPTIONS);

        let labels: Vec<_> = FilterMode::ALL.iter().map(|m| m.label()).collect();
        assert_eq!(labels, FILTER_OPTIONS);

        let labels: Vec<_> = AppStore::ALL.iter().map(|s| s.display_name()).collect();
        assert_eq!(labels, STORE_OPTIONS);

        let labels: Vec<_> = BackupFormat::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, FORMAT_OPTIONS);
    }

    #[test]
    fn test_every_schema_key_has_a_value() {
        let settings = Settings::default();
        for descriptor in SETTINGS_SCHEMA {
            assert!(
                settings.display_value(descriptor.key).is_some(),
                "no value for {}",
                descriptor.key
            );
        }
    }

    #[test]
    fn test_set_value() {
        let mut settings = Settings::default();

        settings.set_value("default_sort", "6").unwrap();
        assert_eq!(settings.default_sort, SortMode::SizeLargest);

        settings.set_value("default_filter", "System Apps").unwrap();
        assert_eq!(settings.default_filter, FilterMode::SystemOnly);

        settings.set_value("preferred_store", "fdroid").unwrap();
        assert_eq!(settings.preferred_store, AppStore::FDroid);

        settings.set_value("auto_backup_format", "html").unwrap();
        assert_eq!(settings.auto_backup_format, BackupFormat::Html);

        settings.set_value("auto_backup", "on").unwrap();
        assert!(settings.auto_backup);
        assert_eq!(settings.display_value("auto_backup").unwrap(), "On");

        assert!(settings.set_value("default_sort", "9").unwrap_err().is_validation());
        assert!(settings.set_value("auto_backup", "perhaps").unwrap_err().is_validation());
        assert!(settings.set_value("no_such_key", "1").unwrap_err().is_not_found());
    }

    #[test]
    fn test_store_update_persists_and_publishes() {
        let (_temp, paths) = test_paths();
        let store = SettingsStore::open(&paths).unwrap();
        let mut receiver = store.subscribe();

        let updated = store
            .update(|s| {
                s.theme_mode = ThemeMode::Dark;
                Ok(())
            })
            .unwrap();

        assert_eq!(updated.theme_mode, ThemeMode::Dark);
        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().theme_mode, ThemeMode::Dark);

        let reopened = SettingsStore::open(&paths).unwrap();
        assert_eq!(reopened.current().theme_mode, ThemeMode::Dark);
    }

    #[test]
    fn test_store_failed_transform_changes_nothing() {
        let (_temp, paths) = test_paths();
        let store = SettingsStore::open(&paths).unwrap();

        let result = store.update(|s| s.set_value("default_sort", "not-a-sort"));
        assert!(result.is_err());
        assert_eq!(store.current(), Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_concurrent_updates_are_all_applied() {
        let (_temp, paths) = test_paths();
        let store = Arc::new(SettingsStore::open(&paths).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    store
                        .update(|s| {
                            s.schema_version += 1;
                            s.show_app_size = i % 2 == 0;
                            Ok(())
                        })
                        .unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.current().schema_version, 9);
        let on_disk = Settings::load_or_create(&paths).unwrap();
        assert_eq!(on_disk.schema_version, 9);
    }

    #[test]
    fn test_reset() {
        let (_temp, paths) = test_paths();
        let store = SettingsStore::open(&paths).unwrap();
        store
            .update(|s| {
                s.auto_backup = true;
                Ok(())
            })
            .unwrap();

        assert_eq!(store.reset().unwrap(), Settings::default());
    }
}
