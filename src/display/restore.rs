//! Restore result display formatting

use crate::models::{AppStore, RestoreResult};

/// Format a restore result, with a store link for each missing app
pub fn format_restore_result(result: &RestoreResult, store: AppStore) -> String {
    let mut output = String::new();
    output.push_str(&result.summary());
    output.push('\n');

    if result.total_apps == 0 {
        output.push_str("The backup contains no apps.\n");
        return output;
    }

    if !result.found_apps.is_empty() {
        output.push_str("\nAlready installed:\n");
        for app in &result.found_apps {
            output.push_str(&format!("  ✓ {} ({})\n", app.app_name, app.package_name));
        }
    }

    if result.is_complete() {
        output.push_str("\nEvery app in the backup is installed.\n");
        return output;
    }

    output.push_str(&format!("\nMissing (install from {}):\n", store));
    for app in &result.missing_apps {
        let version = app
            .version_in_backup
            .as_deref()
            .map(|v| format!(" v{}", v))
            .unwrap_or_default();
        output.push_str(&format!(
            "  ✗ {}{} ({})\n      {}\n",
            app.app_name,
            version,
            app.package_name,
            store.web_url(&app.package_name)
        ));
    }

    output
}
