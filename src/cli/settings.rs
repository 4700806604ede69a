//! Settings CLI commands

use clap::Subcommand;

use crate::config::settings::{descriptor, SettingsStore};
use crate::display::{format_setting_help, format_settings};
use crate::error::{ApplisterError, ApplisterResult};

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Show every setting
    Show,

    /// Change a setting, e.g. `settings set default_sort size`
    Set {
        /// Setting key
        key: String,
        /// New value: an option name or index, or on/off
        value: String,
    },

    /// Describe a setting and the values it accepts
    Describe {
        /// Setting key
        key: String,
    },

    /// Restore every setting to its default
    Reset,
}

/// Handle a settings command
pub fn handle_settings_command(store: &SettingsStore, cmd: SettingsCommands) -> ApplisterResult<()> {
    match cmd {
        SettingsCommands::Show => {
            print!("{}", format_settings(&store.current()));
        }

        SettingsCommands::Set { key, value } => {
            let updated = store.update(|settings| settings.set_value(&key, &value))?;
            let title = descriptor(&key).map(|d| d.title).unwrap_or(key.as_str());

            println!(
                "{} set to {}",
                title,
                updated.display_value(&key).unwrap_or_default()
            );
        }

        SettingsCommands::Describe { key } => {
            let help =
                format_setting_help(&key).ok_or_else(|| ApplisterError::setting_not_found(&key))?;
            println!("{}", help);
        }

        SettingsCommands::Reset => {
            let settings = store.reset()?;
            println!("Settings reset to defaults.");
            print!("{}", format_settings(&settings));
        }
    }

    Ok(())
}
