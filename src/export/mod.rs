//! Backup formatter
//!
//! Renders an app list in one of the four backup formats:
//! - Markdown: a table, readable on any forge or notes app
//! - Plain text: numbered entries
//! - JSON: the restorable `BackupBundle`
//! - HTML: a standalone styled page
//!
//! Only the JSON output is accepted back by the restore engine.

pub mod html;
pub mod json;
pub mod markdown;
pub mod text;

use std::io::Write;

use chrono::{DateTime, Local};

use crate::error::{ApplisterError, ApplisterResult};
use crate::models::{AppRecord, BackupFormat, DeviceInfo};

pub use html::write_html;
pub use json::{parse_bundle, write_json};
pub use markdown::write_markdown;
pub use text::write_plain_text;

/// Title shared by every human-readable format
pub const LIST_TITLE: &str = "My App List";

/// Provenance embedded in formatted output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportContext {
    /// Generation time, epoch milliseconds
    pub created_at: i64,
    pub device: DeviceInfo,
}

impl ExportContext {
    pub fn new(created_at: i64, device: DeviceInfo) -> Self {
        Self { created_at, device }
    }

    /// Generation time as `yyyy-MM-dd HH:mm:ss` in local time
    pub fn generated_label(&self) -> String {
        match DateTime::from_timestamp_millis(self.created_at) {
            Some(dt) => dt
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            None => "-".to_string(),
        }
    }
}

/// Formatted content with its file metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedBackup {
    pub format: BackupFormat,
    pub content: String,
}

impl FormattedBackup {
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Write an app list in the given format
pub fn write_apps<W: Write>(
    apps: &[AppRecord],
    format: BackupFormat,
    ctx: &ExportContext,
    writer: &mut W,
) -> ApplisterResult<()> {
    match format {
        BackupFormat::Markdown => write_markdown(apps, ctx, writer),
        BackupFormat::PlainText => write_plain_text(apps, ctx, writer),
        BackupFormat::Json => write_json(apps, ctx, writer),
        BackupFormat::Html => write_html(apps, ctx, writer),
    }
}

/// Format an app list into an in-memory document
pub fn format_apps(
    apps: &[AppRecord],
    format: BackupFormat,
    ctx: &ExportContext,
) -> ApplisterResult<FormattedBackup> {
    let mut buffer = Vec::new();
    write_apps(apps, format, ctx, &mut buffer)?;

    let content = String::from_utf8(buffer).map_err(|e| ApplisterError::Export(e.to_string()))?;
    Ok(FormattedBackup { format, content })
}

pub(crate) fn export_err(err: std::io::Error) -> ApplisterError {
    ApplisterError::Export(err.to_string())
}
