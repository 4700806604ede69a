//! App stores used for guided reinstallation
//!
//! Each store has a native deep link and a web fallback for a package id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A store that can be opened on a package's page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AppStore {
    #[default]
    PlayStore,
    FDroid,
    Amazon,
    Samsung,
    Huawei,
}

impl AppStore {
    pub const ALL: [AppStore; 5] = [
        Self::PlayStore,
        Self::FDroid,
        Self::Amazon,
        Self::Samsung,
        Self::Huawei,
    ];

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    /// Store at the given index, falling back to Google Play
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(|c: char| c == '-' || c == ' ', "_").as_str() {
            "play" | "play_store" | "google_play" | "google" => Some(Self::PlayStore),
            "fdroid" | "f_droid" => Some(Self::FDroid),
            "amazon" | "amazon_appstore" => Some(Self::Amazon),
            "samsung" | "galaxy" | "galaxy_store" => Some(Self::Samsung),
            "huawei" | "appgallery" => Some(Self::Huawei),
            _ => None,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PlayStore => "Google Play",
            Self::FDroid => "F-Droid",
            Self::Amazon => "Amazon Appstore",
            Self::Samsung => "Galaxy Store",
            Self::Huawei => "AppGallery",
        }
    }

    /// Native store URI for a package
    pub fn deep_link(&self, package_name: &str) -> String {
        match self {
            Self::PlayStore => format!("market://details?id={}", package_name),
            Self::FDroid => format!("fdroid.app://details?id={}", package_name),
            Self::Amazon => format!("amzn://apps/android?p={}", package_name),
            Self::Samsung => format!("samsungapps://ProductDetail/{}", package_name),
            Self::Huawei => format!("appmarket://details?id={}", package_name),
        }
    }

    /// Browser URL used when no store client handles the deep link
    pub fn web_url(&self, package_name: &str) -> String {
        match self {
            Self::PlayStore => {
                format!("https://play.google.com/store/apps/details?id={}", package_name)
            }
            Self::FDroid => format!("https://f-droid.org/packages/{}", package_name),
            Self::Amazon => format!("https://www.amazon.com/gp/mas/dl/android?p={}", package_name),
            Self::Samsung => format!("https://galaxystore.samsung.com/detail/{}", package_name),
            Self::Huawei => format!("https://appgallery.huawei.com/app/{}", package_name),
        }
    }

    pub fn missing_store_message(&self) -> &'static str {
        match self {
            Self::PlayStore => "Google Play Store not installed",
            Self::FDroid => "F-Droid not installed or app not in repository",
            Self::Amazon => "Amazon Appstore not installed",
            Self::Samsung => "Galaxy Store not installed",
            Self::Huawei => "AppGallery not installed",
        }
    }

    pub fn guidance_message(&self) -> &'static str {
        match self {
            Self::PlayStore => {
                "Install Google Play Store or enable 'Open supported links' in browser settings"
            }
            Self::FDroid => {
                "Install F-Droid client or check if the app is available in your repositories"
            }
            Self::Amazon => "Install Amazon Appstore from Amazon's website",
            Self::Samsung => "Galaxy Store is only available on Samsung devices",
            Self::Huawei => "AppGallery is only available on Huawei devices",
        }
    }
}

impl fmt::Display for AppStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Outcome of asking the platform to open a store page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOpenResult {
    Success,
    /// Nothing on the system could handle the link
    NoAppFound,
    Error(String),
}

impl StoreOpenResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links() {
        assert_eq!(
            AppStore::PlayStore.deep_link("org.example"),
            "market://details?id=org.example"
        );
        assert_eq!(
            AppStore::FDroid.web_url("org.example"),
            "https://f-droid.org/packages/org.example"
        );
        assert_eq!(
            AppStore::Samsung.deep_link("org.example"),
            "samsungapps://ProductDetail/org.example"
        );
    }

    #[test]
    fn test_from_index_fallback() {
        assert_eq!(AppStore::from_index(1), AppStore::FDroid);
        assert_eq!(AppStore::from_index(99), AppStore::PlayStore);
    }

    #[test]
    fn test_parse() {
        assert_eq!(AppStore::parse("F-Droid"), Some(AppStore::FDroid));
        assert_eq!(AppStore::parse("galaxy store"), Some(AppStore::Samsung));
        assert_eq!(AppStore::parse("itunes"), None);
    }
}
