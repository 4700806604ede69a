//! Installed application record
//!
//! An `AppRecord` is a snapshot of one installed package as reported by the
//! package registry at enumeration time.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// One installed application's descriptive snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppRecord {
    /// Package identifier, unique per device
    pub package_name: String,

    /// Human-readable label
    pub app_name: String,

    /// Version name as published by the developer
    pub version_name: Option<String>,

    /// Monotonic version code
    pub version_code: i64,

    /// Whether the package ships with the system image
    pub is_system_app: bool,

    /// First install time, epoch milliseconds
    pub install_time_millis: i64,

    /// Last update time, epoch milliseconds
    pub update_time_millis: i64,

    /// Size of the installed package in bytes
    pub apk_size_bytes: u64,

    /// Transient multi-select marker, never persisted
    #[serde(skip)]
    pub is_selected: bool,
}

impl AppRecord {
    /// Create a record with zeroed timestamps and size
    pub fn new(package_name: impl Into<String>, app_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            app_name: app_name.into(),
            version_name: None,
            version_code: 0,
            is_system_app: false,
            install_time_millis: 0,
            update_time_millis: 0,
            apk_size_bytes: 0,
            is_selected: false,
        }
    }

    /// Set the version name and code
    pub fn with_version(mut self, name: impl Into<String>, code: i64) -> Self {
        self.version_name = Some(name.into());
        self.version_code = code;
        self
    }

    /// Mark as a system package
    pub fn system(mut self) -> Self {
        self.is_system_app = true;
        self
    }

    /// Set install and update timestamps (epoch milliseconds)
    pub fn with_times(mut self, installed: i64, updated: i64) -> Self {
        self.install_time_millis = installed;
        self.update_time_millis = updated;
        self
    }

    /// Set the package size in bytes
    pub fn with_size(mut self, bytes: u64) -> Self {
        self.apk_size_bytes = bytes;
        self
    }

    pub fn installed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.install_time_millis)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.update_time_millis)
    }

    /// Install time as `yyyy-MM-dd HH:mm` in local time
    pub fn installed_date_formatted(&self) -> String {
        format_timestamp(self.install_time_millis)
    }

    /// Last update time as `yyyy-MM-dd HH:mm` in local time
    pub fn updated_date_formatted(&self) -> String {
        format_timestamp(self.update_time_millis)
    }

    /// Package size in binary units
    pub fn size_formatted(&self) -> String {
        format_size(self.apk_size_bytes)
    }

    /// Version name, or `-` when the package does not declare one
    pub fn version_display(&self) -> &str {
        self.version_name.as_deref().unwrap_or("-")
    }
}

/// Format epoch milliseconds as `yyyy-MM-dd HH:mm` in local time
pub fn format_timestamp(millis: i64) -> String {
    match DateTime::from_timestamp_millis(millis) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

/// Format a byte count using binary units with one decimal place
///
/// Zero renders as `0 B`; values are capped at GB.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}
