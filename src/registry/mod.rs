//! Package registry
//!
//! The registry is the platform's view of installed packages. The library
//! only talks to it through `PackageRegistry`; `SnapshotRegistry` reads a
//! device inventory file and `MemoryRegistry` holds a fixed list in memory.

pub mod memory;
pub mod snapshot;

pub use memory::MemoryRegistry;
pub use snapshot::SnapshotRegistry;

use crate::error::ApplisterResult;
use crate::models::{AppRecord, DeviceInfo};

/// Source of installed-package information
pub trait PackageRegistry {
    /// Enumerate installed packages
    ///
    /// Packages whose metadata cannot be read are skipped, so the result may be
    /// partial; an error means the registry as a whole was unreachable.
    fn installed_apps(&self) -> ApplisterResult<Vec<AppRecord>>;

    /// Whether a package with this identifier is currently installed
    fn is_installed(&self, package_name: &str) -> bool;

    /// Model and OS version of the device
    fn device_info(&self) -> DeviceInfo;
}
