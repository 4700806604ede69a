//! Standalone HTML page export

use std::io::Write;

use super::{export_err, ExportContext, LIST_TITLE};
use crate::error::ApplisterResult;
use crate::models::AppRecord;

const STYLE: &str = "\
body { font-family: -apple-system, BlinkMacSystemFont, sans-serif; max-width: 900px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
h1 { color: #00695C; }
.meta { color: #666; margin-bottom: 20px; }
table { width: 100%; border-collapse: collapse; background: white; border-radius: 8px; overflow: hidden; box-shadow: 0 1px 3px rgba(0,0,0,0.1); }
th { background: #00695C; color: white; padding: 12px; text-align: left; }
td { padding: 10px 12px; border-bottom: 1px solid #eee; }
tr:hover { background: #f0f0f0; }";

/// Write the app list as a self-contained HTML document
pub fn write_html<W: Write>(
    apps: &[AppRecord],
    ctx: &ExportContext,
    writer: &mut W,
) -> ApplisterResult<()> {
    writeln!(writer, "<!DOCTYPE html>").map_err(export_err)?;
    writeln!(writer, "<html><head><meta charset=\"utf-8\">").map_err(export_err)?;
    writeln!(writer, "<title>{}</title>", LIST_TITLE).map_err(export_err)?;
    writeln!(writer, "<style>\n{}\n</style></head><body>", STYLE).map_err(export_err)?;
    writeln!(writer, "<h1>{}</h1>", LIST_TITLE).map_err(export_err)?;

    writeln!(writer, "<div class=\"meta\">").map_err(export_err)?;
    writeln!(writer, "<p>Generated: {}</p>", ctx.generated_label()).map_err(export_err)?;
    writeln!(
        writer,
        "<p>Device: {} · Android {}</p>",
        escape(&ctx.device.model),
        escape(&ctx.device.os_version)
    )
    .map_err(export_err)?;
    writeln!(writer, "<p>Total apps: {}</p>", apps.len()).map_err(export_err)?;
    writeln!(writer, "</div>").map_err(export_err)?;

    writeln!(writer, "<table>").map_err(export_err)?;
    writeln!(
        writer,
        "<tr><th>#</th><th>App Name</th><th>Package</th><th>Version</th><th>Installed</th><th>Size</th></tr>"
    )
    .map_err(export_err)?;

    for (index, app) in apps.iter().enumerate() {
        writeln!(
            writer,
            "<tr><td>{}</td><td>{}</td><td><code>{}</code></td><td>{}</td><td>{}</td><td>{}</td></tr>",
            index + 1,
            escape(&app.app_name),
            escape(&app.package_name),
            escape(app.version_display()),
            app.installed_date_formatted(),
            app.size_formatted()
        )
        .map_err(export_err)?;
    }

    writeln!(writer, "</table></body></html>").map_err(export_err)?;
    Ok(())
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
