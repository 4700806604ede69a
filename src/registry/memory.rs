//! In-memory package registry

use crate::error::ApplisterResult;
use crate::models::{AppRecord, DeviceInfo};

use super::PackageRegistry;

/// Registry over a fixed list of records
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    device: DeviceInfo,
    apps: Vec<AppRecord>,
}

impl MemoryRegistry {
    pub fn new(device: DeviceInfo, apps: Vec<AppRecord>) -> Self {
        Self { device, apps }
    }

    /// Add a package
    pub fn install(&mut self, app: AppRecord) {
        self.apps.retain(|a| a.package_name != app.package_name);
        self.apps.push(app);
    }

    /// Remove a package; returns whether it was present
    pub fn uninstall(&mut self, package_name: &str) -> bool {
        let before = self.apps.len();
        self.apps.retain(|a| a.package_name != package_name);
        self.apps.len() != before
    }
}

impl PackageRegistry for MemoryRegistry {
    fn installed_apps(&self) -> ApplisterResult<Vec<AppRecord>> {
        Ok(self.apps.clone())
    }

    fn is_installed(&self, package_name: &str) -> bool {
        self.apps.iter().any(|a| a.package_name == package_name)
    }

    fn device_info(&self) -> DeviceInfo {
        self.device.clone()
    }
}
