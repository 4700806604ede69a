//! Backup formats and the JSON backup bundle
//!
//! The bundle is the only bit-exact wire format: camelCase keys, unknown keys
//! ignored on read, missing optional keys replaced by their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::app::AppRecord;
use super::device::DeviceInfo;

/// Output format of a backup or export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackupFormat {
    /// Markdown table
    #[default]
    Markdown,
    /// Plain text listing
    PlainText,
    /// Restorable JSON bundle
    Json,
    /// Standalone HTML page
    Html,
}

impl BackupFormat {
    pub const ALL: [BackupFormat; 4] = [Self::Markdown, Self::PlainText, Self::Json, Self::Html];

    /// Position of this format in the settings option list
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|f| f == self).unwrap_or(0)
    }

    /// Format at the given index; unsupported selectors fall back to Markdown
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Parse a format from a name or file extension
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" => Some(Self::Markdown),
            "text" | "txt" | "plain" | "plain_text" | "plaintext" => Some(Self::PlainText),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    /// Conventional file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::PlainText => "txt",
            Self::Json => "json",
            Self::Html => "html",
        }
    }

    /// Label recorded in backup metadata
    pub fn label(&self) -> &'static str {
        match self {
            Self::Markdown => "Markdown",
            Self::PlainText => "Plain Text",
            Self::Json => "JSON",
            Self::Html => "HTML",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Markdown => "text/markdown",
            Self::PlainText => "text/plain",
            Self::Json => "application/json",
            Self::Html => "text/html",
        }
    }

    /// Only the JSON bundle can be fed back into a restore
    pub fn is_restorable(&self) -> bool {
        matches!(self, Self::Json)
    }

    /// Recover a format from a metadata label, falling back to Markdown
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.label().eq_ignore_ascii_case(label))
            .unwrap_or_default()
    }
}

impl fmt::Display for BackupFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The restorable subset of an `AppRecord`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupEntry {
    pub package_name: String,

    pub app_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,

    #[serde(default)]
    pub version_code: i64,

    #[serde(default)]
    pub is_system_app: bool,
}

impl From<&AppRecord> for BackupEntry {
    fn from(app: &AppRecord) -> Self {
        Self {
            package_name: app.package_name.clone(),
            app_name: app.app_name.clone(),
            version_name: app.version_name.clone(),
            version_code: app.version_code,
            is_system_app: app.is_system_app,
        }
    }
}

/// A restorable app list plus provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupBundle {
    /// Creation time, epoch milliseconds
    #[serde(default)]
    pub created_at: i64,

    #[serde(default)]
    pub device_name: String,

    #[serde(default)]
    pub android_version: String,

    pub apps: Vec<BackupEntry>,
}

impl BackupBundle {
    /// Build a bundle from an app list, keeping its order
    pub fn from_apps(apps: &[AppRecord], device: &DeviceInfo, created_at: i64) -> Self {
        Self {
            created_at,
            device_name: device.model.clone(),
            android_version: device.os_version.clone(),
            apps: apps.iter().map(BackupEntry::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_metadata() {
        assert_eq!(BackupFormat::Markdown.extension(), "md");
        assert_eq!(BackupFormat::PlainText.extension(), "txt");
        assert_eq!(BackupFormat::Json.extension(), "json");
        assert_eq!(BackupFormat::Html.extension(), "html");

        assert_eq!(BackupFormat::PlainText.label(), "Plain Text");
        assert_eq!(BackupFormat::Html.mime_type(), "text/html");
        assert!(BackupFormat::Json.is_restorable());
        assert!(!BackupFormat::Html.is_restorable());
    }

    #[test]
    fn test_unsupported_index_falls_back_to_markdown() {
        assert_eq!(BackupFormat::from_index(2), BackupFormat::Json);
        assert_eq!(BackupFormat::from_index(9), BackupFormat::Markdown);
        assert_eq!(BackupFormat::from_label("bogus"), BackupFormat::Markdown);
        assert_eq!(BackupFormat::from_label("Plain Text"), BackupFormat::PlainText);
    }

    #[test]
    fn test_bundle_wire_keys() {
        let apps = vec![AppRecord::new("a.b", "Beta").with_version("1.0", 3).system()];
        let bundle = BackupBundle::from_apps(&apps, &DeviceInfo::new("Pixel 8", "14"), 1234);

        let value = serde_json::to_value(&bundle).unwrap();
        assert_eq!(value["createdAt"], 1234);
        assert_eq!(value["deviceName"], "Pixel 8");
        assert_eq!(value["androidVersion"], "14");
        assert_eq!(value["apps"][0]["packageName"], "a.b");
        assert_eq!(value["apps"][0]["appName"], "Beta");
        assert_eq!(value["apps"][0]["versionName"], "1.0");
        assert_eq!(value["apps"][0]["versionCode"], 3);
        assert_eq!(value["apps"][0]["isSystemApp"], true);
    }

    #[test]
    fn test_bundle_defaults_and_unknown_keys() {
        let json = r#"{
            "apps": [{"packageName": "x.y", "appName": "X", "futureField": [1, 2]}],
            "schema": 9
        }"#;

        let bundle: BackupBundle = serde_json::from_str(json).unwrap();
        assert_eq!(bundle.created_at, 0);
        assert_eq!(bundle.device_name, "");
        let entry = &bundle.apps[0];
        assert_eq!(entry.version_name, None);
        assert_eq!(entry.version_code, 0);
        assert!(!entry.is_system_app);
    }

    #[test]
    fn test_bundle_requires_apps() {
        assert!(serde_json::from_str::<BackupBundle>(r#"{"createdAt": 1}"#).is_err());
    }
}
