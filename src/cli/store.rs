//! Store CLI commands
//!
//! Open a package's page in an app store, or list every store's links.

use clap::Subcommand;
use tabled::{builder::Builder, settings::Style};

use crate::config::settings::Settings;
use crate::error::{ApplisterError, ApplisterResult};
use crate::models::{AppStore, StoreOpenResult};
use crate::services::{open_in_store, SystemOpener};

use super::parse_store;

/// Store subcommands
#[derive(Subcommand, Debug)]
pub enum StoreCommands {
    /// Open a package's store page
    Open {
        /// Package name, e.g. org.example.maps
        package: String,

        /// Store to open (defaults to the preferred store)
        #[arg(long, value_parser = parse_store)]
        store: Option<AppStore>,
    },

    /// Show the deep link and web link of every store
    Links {
        /// Package name, e.g. org.example.maps
        package: String,
    },
}

/// Handle a store command
pub fn handle_store_command(settings: &Settings, cmd: StoreCommands) -> ApplisterResult<()> {
    match cmd {
        StoreCommands::Open { package, store } => {
            let store = store.unwrap_or(settings.preferred_store);

            match open_in_store(store, &package, &SystemOpener) {
                StoreOpenResult::Success => {
                    println!("Opened {} page for {}", store, package);
                }
                StoreOpenResult::NoAppFound => {
                    eprintln!("{}", store.missing_store_message());
                    eprintln!("{}", store.guidance_message());
                    println!("{}", store.web_url(&package));
                }
                StoreOpenResult::Error(message) => {
                    return Err(ApplisterError::Validation(format!(
                        "Could not open {}: {}",
                        store, message
                    )));
                }
            }
        }

        StoreCommands::Links { package } => {
            let mut builder = Builder::default();
            builder.push_record(["Store", "Deep link", "Web"]);
            for store in AppStore::ALL {
                builder.push_record([
                    store.display_name().to_string(),
                    store.deep_link(&package),
                    store.web_url(&package),
                ]);
            }

            let mut table = builder.build();
            table.with(Style::sharp());
            println!("{}", table);
        }
    }

    Ok(())
}
