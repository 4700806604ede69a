//! Device identification

use serde::{Deserialize, Serialize};

/// Model and OS version of the device an inventory was taken from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    #[serde(default = "unknown")]
    pub model: String,

    #[serde(default = "unknown")]
    pub os_version: String,
}

fn unknown() -> String {
    "unknown".to_string()
}

impl DeviceInfo {
    pub fn new(model: impl Into<String>, os_version: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            os_version: os_version.into(),
        }
    }
}

impl Default for DeviceInfo {
    fn default() -> Self {
        Self::new(unknown(), unknown())
    }
}
