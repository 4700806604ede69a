//! Plain text export

use std::io::Write;

use super::{export_err, ExportContext, LIST_TITLE};
use crate::error::ApplisterResult;
use crate::models::AppRecord;

const RULE_WIDTH: usize = 60;

/// Write the app list as numbered plain-text entries
pub fn write_plain_text<W: Write>(
    apps: &[AppRecord],
    ctx: &ExportContext,
    writer: &mut W,
) -> ApplisterResult<()> {
    writeln!(writer, "{}", LIST_TITLE).map_err(export_err)?;
    writeln!(writer, "Generated: {}", ctx.generated_label()).map_err(export_err)?;
    writeln!(writer, "Device: {}", ctx.device.model).map_err(export_err)?;
    writeln!(writer, "Android: {}", ctx.device.os_version).map_err(export_err)?;
    writeln!(writer, "Total apps: {}", apps.len()).map_err(export_err)?;
    writeln!(writer, "{}", "─".repeat(RULE_WIDTH)).map_err(export_err)?;

    for (index, app) in apps.iter().enumerate() {
        writeln!(writer, "{}. {}", index + 1, app.app_name).map_err(export_err)?;
        writeln!(writer, "   Package: {}", app.package_name).map_err(export_err)?;
        writeln!(writer, "   Version: {}", app.version_display()).map_err(export_err)?;
        writeln!(writer, "   Installed: {}", app.installed_date_formatted()).map_err(export_err)?;
        writeln!(writer, "   Size: {}", app.size_formatted()).map_err(export_err)?;
        writeln!(writer).map_err(export_err)?;
    }

    Ok(())
}
