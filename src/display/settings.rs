//! Settings display formatting

use crate::config::settings::{SettingKind, SETTINGS_SCHEMA};
use crate::config::Settings;

/// Format every setting grouped by category, in schema order
pub fn format_settings(settings: &Settings) -> String {
    let mut output = String::new();
    let mut current_category = None;

    for descriptor in SETTINGS_SCHEMA {
        if current_category != Some(descriptor.category) {
            if current_category.is_some() {
                output.push('\n');
            }
            output.push_str(&format!("{}\n", descriptor.category.label()));
            current_category = Some(descriptor.category);
        }

        let value = settings.display_value(descriptor.key).unwrap_or_default();
        output.push_str(&format!(
            "  {:<24} {:<22} ({})\n",
            descriptor.title, value, descriptor.key
        ));
    }

    output
}

/// Describe the values a setting accepts
pub fn format_setting_help(key: &str) -> Option<String> {
    let descriptor = crate::config::settings::descriptor(key)?;
    let accepted = match descriptor.kind {
        SettingKind::Toggle => "on, off".to_string(),
        SettingKind::Dropdown { options } => options
            .iter()
            .enumerate()
            .map(|(i, o)| format!("{}={}", i, o))
            .collect::<Vec<_>>()
            .join(", "),
    };

    Some(format!(
        "{}: {}\n  Accepted values: {}",
        descriptor.title, descriptor.description, accepted
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grouped_by_category() {
        let output = format_settings(&Settings::default());

        let general = output.find("General\n").unwrap();
        let appearance = output.find("Appearance\n").unwrap();
        let backup = output.find("Backup\n").unwrap();
        assert!(general < appearance && appearance < backup);

        assert!(output.contains("Default Sort"));
        assert!(output.contains("Name (A→Z)"));
        assert!(output.contains("(auto_backup_format)"));
    }

    #[test]
    fn test_setting_help() {
        let help = format_setting_help("default_filter").unwrap();
        assert!(help.contains("0=All Apps, 1=User Apps, 2=System Apps"));

        assert!(format_setting_help("auto_backup").unwrap().contains("on, off"));
        assert!(format_setting_help("nope").is_none());
    }
}
