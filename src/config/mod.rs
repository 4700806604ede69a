//! Configuration module for applister
//!
//! - Data-directory resolution
//! - User settings persistence and observation

pub mod paths;
pub mod settings;

pub use paths::ApplisterPaths;
pub use settings::{Settings, SettingsStore, SETTINGS_SCHEMA};
