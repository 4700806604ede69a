//! JSON export of the restorable backup bundle
//!
//! The bundle keeps only what matters for matching on another device:
//! package id, name, version and the system flag. Sizes and install times are
//! device specific and left out.

use std::io::Write;

use super::ExportContext;
use crate::error::{ApplisterError, ApplisterResult};
use crate::models::{AppRecord, BackupBundle};

/// Write the app list as a pretty-printed `BackupBundle`
pub fn write_json<W: Write>(
    apps: &[AppRecord],
    ctx: &ExportContext,
    writer: &mut W,
) -> ApplisterResult<()> {
    let bundle = BackupBundle::from_apps(apps, &ctx.device, ctx.created_at);

    serde_json::to_writer_pretty(&mut *writer, &bundle)
        .map_err(|e| ApplisterError::Export(e.to_string()))?;
    writeln!(writer).map_err(super::export_err)?;

    Ok(())
}

/// Parse a bundle, ignoring unknown keys
pub fn parse_bundle(json_str: &str) -> ApplisterResult<BackupBundle> {
    serde_json::from_str(json_str)
        .map_err(|e| ApplisterError::Restore(format!("Not a valid backup bundle: {}", e)))
}
