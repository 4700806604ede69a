//! Markdown table export

use std::io::Write;

use super::{export_err, ExportContext, LIST_TITLE};
use crate::error::ApplisterResult;
use crate::models::AppRecord;

/// Write the app list as a Markdown document with one table row per app
pub fn write_markdown<W: Write>(
    apps: &[AppRecord],
    ctx: &ExportContext,
    writer: &mut W,
) -> ApplisterResult<()> {
    writeln!(writer, "# {}", LIST_TITLE).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;
    writeln!(writer, "Generated: {}", ctx.generated_label()).map_err(export_err)?;
    writeln!(writer, "Device: {}", cell(&ctx.device.model)).map_err(export_err)?;
    writeln!(writer, "Android: {}", cell(&ctx.device.os_version)).map_err(export_err)?;
    writeln!(writer, "Total apps: {}", apps.len()).map_err(export_err)?;
    writeln!(writer).map_err(export_err)?;

    writeln!(
        writer,
        "| # | App Name | Package Name | Version | Installed | Size |"
    )
    .map_err(export_err)?;
    writeln!(
        writer,
        "|---|----------|--------------|---------|-----------|------|"
    )
    .map_err(export_err)?;

    for (index, app) in apps.iter().enumerate() {
        writeln!(
            writer,
            "| {} | {} | {} | {} | {} | {} |",
            index + 1,
            cell(&app.app_name),
            cell(&app.package_name),
            cell(app.version_display()),
            app.installed_date_formatted(),
            app.size_formatted()
        )
        .map_err(export_err)?;
    }

    Ok(())
}

// Pipes and newlines would break the table layout
fn cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}
