//! Package registry backed by a device inventory file
//!
//! The inventory is a JSON document captured from a device:
//!
//! ```json
//! {
//!   "device": { "model": "Pixel 8", "osVersion": "14" },
//!   "packages": [
//!     {
//!       "packageName": "org.example.app",
//!       "label": "Example",
//!       "versionName": "1.2.0",
//!       "versionCode": 120,
//!       "system": false,
//!       "firstInstallTime": 1700000000000,
//!       "lastUpdateTime": 1700000500000,
//!       "apkSize": 1048576,
//!       "sourceDir": "/data/app/org.example.app/base.apk"
//!     }
//!   ]
//! }
//! ```
//!
//! Each package entry is decoded on its own, so one malformed entry does not
//! hide the rest of the device.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{ApplisterError, ApplisterResult};
use crate::models::{AppRecord, DeviceInfo};

use super::PackageRegistry;

/// One package entry as captured in the inventory
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageEntry {
    package_name: String,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    version_name: Option<String>,
    #[serde(default)]
    version_code: i64,
    #[serde(default)]
    system: bool,
    #[serde(default)]
    first_install_time: i64,
    #[serde(default)]
    last_update_time: i64,
    #[serde(default)]
    apk_size: Option<u64>,
    #[serde(default)]
    source_dir: Option<PathBuf>,
}

impl PackageEntry {
    fn into_record(self) -> Option<AppRecord> {
        if self.package_name.trim().is_empty() {
            return None;
        }

        let apk_size_bytes = self.apk_size.unwrap_or_else(|| {
            self.source_dir
                .as_deref()
                .and_then(|p| fs::metadata(p).ok())
                .map(|m| m.len())
                .unwrap_or(0)
        });

        let app_name = self
            .label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| self.package_name.clone());

        Some(AppRecord {
            package_name: self.package_name,
            app_name,
            version_name: self.version_name,
            version_code: self.version_code,
            is_system_app: self.system,
            install_time_millis: self.first_install_time,
            update_time_millis: self.last_update_time,
            apk_size_bytes,
            is_selected: false,
        })
    }
}

/// Registry reading packages from an inventory snapshot
#[derive(Debug, Clone)]
pub struct SnapshotRegistry {
    device: DeviceInfo,
    entries: Vec<Value>,
    installed: HashSet<String>,
}

impl SnapshotRegistry {
    /// Load an inventory file
    pub fn load(path: &Path) -> ApplisterResult<Self> {
        if !path.exists() {
            return Err(ApplisterError::Registry(format!(
                "Inventory file not found: {} (pass --inventory or set APPLISTER_INVENTORY)",
                path.display()
            )));
        }

        let contents = fs::read_to_string(path).map_err(|e| {
            ApplisterError::Registry(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::from_json_str(&contents)
    }

    /// Parse an inventory document
    pub fn from_json_str(contents: &str) -> ApplisterResult<Self> {
        let document: Value = serde_json::from_str(contents)
            .map_err(|e| ApplisterError::Registry(format!("Inventory is not valid JSON: {}", e)))?;

        let device = document
            .get("device")
            .cloned()
            .and_then(|d| serde_json::from_value(d).ok())
            .unwrap_or_default();

        let entries = match document.get("packages") {
            Some(Value::Array(entries)) => entries.clone(),
            _ => {
                return Err(ApplisterError::Registry(
                    "Inventory has no \"packages\" array".into(),
                ))
            }
        };

        let installed = entries
            .iter()
            .filter_map(|e| e.get("packageName").and_then(Value::as_str))
            .map(str::to_string)
            .collect();

        Ok(Self {
            device,
            entries,
            installed,
        })
    }
}

impl PackageRegistry for SnapshotRegistry {
    fn installed_apps(&self) -> ApplisterResult<Vec<AppRecord>> {
        let mut apps = Vec::with_capacity(self.entries.len());

        for (index, entry) in self.entries.iter().enumerate() {
            let record = serde_json::from_value::<PackageEntry>(entry.clone())
                .ok()
                .and_then(PackageEntry::into_record);

            match record {
                Some(app) => apps.push(app),
                None => debug!(index, "skipping unreadable package entry"),
            }
        }

        Ok(apps)
    }

    fn is_installed(&self, package_name: &str) -> bool {
        self.installed.contains(package_name)
    }

    fn device_info(&self) -> DeviceInfo {
        self.device.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const INVENTORY: &str = r#"{
        "device": { "model": "Pixel 8", "osVersion": "14" },
        "packages": [
            {
                "packageName": "org.example.notes",
                "label": "Notes",
                "versionName": "2.1",
                "versionCode": 21,
                "firstInstallTime": 1000,
                "lastUpdateTime": 2000,
                "apkSize": 4096
            },
            { "packageName": "com.android.settings", "system": true },
            { "label": "no package name" },
            { "packageName": "org.example.broken", "versionCode": "twelve" },
            { "packageName": "   " }
        ]
    }"#;

    #[test]
    fn test_enumeration_skips_unreadable_entries() {
        let registry = SnapshotRegistry::from_json_str(INVENTORY).unwrap();
        let apps = registry.installed_apps().unwrap();

        let names: Vec<_> = apps.iter().map(|a| a.package_name.as_str()).collect();
        assert_eq!(names, vec!["org.example.notes", "com.android.settings"]);

        let notes = &apps[0];
        assert_eq!(notes.app_name, "Notes");
        assert_eq!(notes.version_name.as_deref(), Some("2.1"));
        assert_eq!(notes.version_code, 21);
        assert_eq!(notes.apk_size_bytes, 4096);
        assert!(!notes.is_system_app);
    }

    #[test]
    fn test_label_falls_back_to_package_name() {
        let registry = SnapshotRegistry::from_json_str(INVENTORY).unwrap();
        let apps = registry.installed_apps().unwrap();

        assert_eq!(apps[1].app_name, "com.android.settings");
        assert!(apps[1].is_system_app);
    }

    #[test]
    fn test_size_from_source_dir() {
        let temp_dir = TempDir::new().unwrap();
        let apk = temp_dir.path().join("base.apk");
        fs::write(&apk, vec![0u8; 300]).unwrap();

        let inventory = serde_json::json!({
            "packages": [
                { "packageName": "a.b", "sourceDir": apk },
                { "packageName": "a.c", "sourceDir": temp_dir.path().join("missing.apk") }
            ]
        });

        let registry = SnapshotRegistry::from_json_str(&inventory.to_string()).unwrap();
        let apps = registry.installed_apps().unwrap();
        assert_eq!(apps[0].apk_size_bytes, 300);
        assert_eq!(apps[1].apk_size_bytes, 0);
        assert_eq!(registry.device_info(), DeviceInfo::default());
    }

    #[test]
    fn test_is_installed() {
        let registry = SnapshotRegistry::from_json_str(INVENTORY).unwrap();
        assert!(registry.is_installed("org.example.notes"));
        assert!(registry.is_installed("org.example.broken"));
        assert!(!registry.is_installed("org.example.absent"));
        assert_eq!(registry.device_info().model, "Pixel 8");
    }

    #[test]
    fn test_load_errors() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("inventory.json");
        assert!(matches!(
            SnapshotRegistry::load(&missing),
            Err(ApplisterError::Registry(_))
        ));

        assert!(SnapshotRegistry::from_json_str("[]").is_err());
        assert!(SnapshotRegistry::from_json_str("nope").is_err());
    }
}
