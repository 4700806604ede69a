//! Core data models for applister
//!
//! App records, list modes, backup formats and bundles, restore results and
//! store links.

pub mod app;
pub mod backup;
pub mod device;
pub mod modes;
pub mod restore;
pub mod store;

pub use app::{format_size, format_timestamp, AppRecord};
pub use backup::{BackupBundle, BackupEntry, BackupFormat};
pub use device::DeviceInfo;
pub use modes::{FilterMode, SortMode, ThemeMode};
pub use restore::{RestoreResult, RestoredApp};
pub use store::{AppStore, StoreOpenResult};
