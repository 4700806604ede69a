use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use applister::cli::{
    handle_backup_command, handle_export_command, handle_list_command, handle_restore_command,
    handle_settings_command, handle_store_command, open_registry, BackupCommands, ExportArgs,
    ListArgs, RestoreArgs, SettingsCommands, StoreCommands,
};
use applister::config::{ApplisterPaths, SettingsStore};

#[derive(Parser)]
#[command(
    name = "applister",
    version,
    about = "List, back up and restore the apps installed on a device",
    long_about = "applister reads a device's package inventory, shows the installed \
                  apps, writes backups of the list in Markdown, plain text, JSON or \
                  HTML, and compares JSON backups with what is installed so missing \
                  apps can be reinstalled from a store."
)]
struct Cli {
    /// Device package inventory (defaults to inventory.json in the data directory)
    #[arg(long, global = true, env = "APPLISTER_INVENTORY")]
    inventory: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List installed apps
    #[command(alias = "ls")]
    List(ListArgs),

    /// Write the app list in a chosen format without recording a backup
    Export(ExportArgs),

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Compare a JSON backup with the installed apps
    Restore(RestoreArgs),

    /// App store links for reinstalling
    #[command(subcommand)]
    Store(StoreCommands),

    /// Show or change settings
    #[command(subcommand)]
    Settings(SettingsCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let paths = ApplisterPaths::new()?;
    let settings_store = SettingsStore::open(&paths)?;
    let settings = settings_store.current();
    let inventory = cli.inventory.as_deref();

    match cli.command {
        Some(Commands::List(args)) => {
            let registry = open_registry(&paths, inventory)?;
            handle_list_command(&paths, &settings, &registry, args)?;
        }
        Some(Commands::Export(args)) => {
            handle_export_command(&paths, &settings, inventory, args)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(&paths, &settings, inventory, cmd)?;
        }
        Some(Commands::Restore(args)) => {
            handle_restore_command(&paths, &settings, inventory, args)?;
        }
        Some(Commands::Store(cmd)) => {
            handle_store_command(&settings, cmd)?;
        }
        Some(Commands::Settings(cmd)) => {
            handle_settings_command(&settings_store, cmd)?;
        }
        Some(Commands::Config) => {
            println!("applister Configuration");
            println!("=======================");
            println!("Data directory:   {}", paths.base_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Backup records:   {}", paths.backup_records_file().display());
            println!(
                "Inventory:        {}",
                inventory
                    .map(|p| p.to_path_buf())
                    .unwrap_or_else(|| paths.inventory_file())
                    .display()
            );
        }
        None => {
            println!("applister - installed app lists, backups and restores");
            println!();
            println!("Run 'applister --help' for usage information.");
            println!("Run 'applister list' to see the installed apps.");
        }
    }

    Ok(())
}

/// Install a stderr subscriber; `RUST_LOG` wins over the flags when set
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if quiet => EnvFilter::new("error"),
        Err(_) => match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        },
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
