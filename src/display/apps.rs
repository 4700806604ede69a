//! App list display formatting

use tabled::{builder::Builder, settings::Style};

use crate::config::Settings;
use crate::models::AppRecord;
use crate::services::AppCounts;

/// Format apps as a table
///
/// The package and size columns follow the `show_package_name` and
/// `show_app_size` settings.
pub fn format_app_table(apps: &[AppRecord], settings: &Settings) -> String {
    if apps.is_empty() {
        return "No apps found.".to_string();
    }

    let mut builder = Builder::default();

    let mut header = vec!["#", "App"];
    if settings.show_package_name {
        header.push("Package");
    }
    header.extend(["Version", "Installed"]);
    if settings.show_app_size {
        header.push("Size");
    }
    header.push("Type");
    builder.push_record(header);

    for (index, app) in apps.iter().enumerate() {
        let mut row = vec![(index + 1).to_string(), app.app_name.clone()];
        if settings.show_package_name {
            row.push(app.package_name.clone());
        }
        row.push(app.version_display().to_string());
        row.push(app.installed_date_formatted());
        if settings.show_app_size {
            row.push(app.size_formatted());
        }
        row.push(if app.is_system_app { "system" } else { "user" }.to_string());
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

/// One-line count summary, e.g. "Showing 2 of 5 apps (4 user, 1 system)"
pub fn format_counts(shown: usize, counts: &AppCounts) -> String {
    format!(
        "Showing {} of {} apps ({} user, {} system)",
        shown, counts.total, counts.user, counts.system
    )
}

/// Detailed view of a single app
pub fn format_app_details(app: &AppRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", app.app_name));
    output.push_str(&format!("  Package:        {}\n", app.package_name));
    output.push_str(&format!(
        "  Version:        {} ({})\n",
        app.version_display(),
        app.version_code
    ));
    output.push_str(&format!(
        "  Type:           {}\n",
        if app.is_system_app { "System" } else { "User" }
    ));
    output.push_str(&format!("  Installed:      {}\n", app.installed_date_formatted()));
    output.push_str(&format!("  Updated:        {}\n", app.updated_date_formatted()));
    output.push_str(&format!("  Size:           {}\n", app.size_formatted()));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apps() -> Vec<AppRecord> {
        vec![
            AppRecord::new("org.example.maps", "Maps")
                .with_version("3.2", 32)
                .with_size(2048),
            AppRecord::new("com.android.settings", "Settings").system(),
        ]
    }

    #[test]
    fn test_columns_follow_settings() {
        let mut settings = Settings::default();
        let table = format_app_table(&apps(), &settings);
        assert!(table.contains("Package"));
        assert!(table.contains("org.example.maps"));
        assert!(!table.contains("Size"));

        settings.show_package_name = false;
        settings.show_app_size = true;
        let table = format_app_table(&apps(), &settings);
        assert!(!table.contains("org.example.maps"));
        assert!(table.contains("Size"));
        assert!(table.contains("2.0 KB"));
        assert!(table.contains("system"));
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_app_table(&[], &Settings::default()), "No apps found.");
    }

    #[test]
    fn test_counts_and_details() {
        let counts = AppCounts {
            total: 5,
            user: 4,
            system: 1,
        };
        assert_eq!(
            format_counts(2, &counts),
            "Showing 2 of 5 apps (4 user, 1 system)"
        );

        let details = format_app_details(&apps()[0]);
        assert!(details.contains("Version:        3.2 (32)"));
        assert!(details.contains("Type:           User"));
    }
}
