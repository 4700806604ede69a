//! applister - inventory, back up and restore installed applications
//!
//! This library provides the core of applister: it reads the packages
//! installed on a device, presents them filtered, searched and sorted, writes
//! backups of the list in several formats and compares JSON backups with what
//! is currently installed.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path management and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (app records, modes, backup bundles, stores)
//! - `registry`: Access to the device's installed packages
//! - `services`: List transformation, observable list state, store links
//! - `export`: Backup formatting (Markdown, plain text, JSON, HTML)
//! - `storage`: JSON file storage and the backup metadata table
//! - `backup`: Backup store and restore engine
//! - `display`: Terminal formatting
//! - `cli`: Command handlers for the `applister` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use applister::config::{ApplisterPaths, SettingsStore};
//! use applister::registry::{PackageRegistry, SnapshotRegistry};
//! use applister::services::AppListState;
//!
//! let paths = ApplisterPaths::new()?;
//! let settings = SettingsStore::open(&paths)?.current();
//! let registry = SnapshotRegistry::load(&paths.inventory_file())?;
//!
//! let mut state = AppListState::from_settings(&settings);
//! state.set_apps(registry.installed_apps()?);
//! state.set_query("maps");
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod registry;
pub mod services;
pub mod storage;

pub use error::{ApplisterError, ApplisterResult};
