//! List presentation modes
//!
//! Filter and sort orderings for the app list, plus the UI theme choice.
//! Each mode has a stable index used by the settings schema; unknown indices
//! fall back to the default mode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which subset of installed apps to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Every installed package
    #[default]
    All,
    /// Packages installed by the user
    UserOnly,
    /// Packages that ship with the system image
    SystemOnly,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [Self::All, Self::UserOnly, Self::SystemOnly];

    /// Position of this mode in the settings option list
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Mode at the given index, falling back to `All`
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Parse a filter mode from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "user" | "user_only" | "user-only" => Some(Self::UserOnly),
            "system" | "system_only" | "system-only" => Some(Self::SystemOnly),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All Apps",
            Self::UserOnly => "User Apps",
            Self::SystemOnly => "System Apps",
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordering applied to the app list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Display name, A to Z
    #[default]
    NameAsc,
    /// Display name, Z to A
    NameDesc,
    /// Most recently installed first
    InstallDateNewest,
    /// Least recently installed first
    InstallDateOldest,
    /// Most recently updated first
    UpdateDateNewest,
    /// Least recently updated first
    UpdateDateOldest,
    /// Largest package first
    SizeLargest,
    /// Smallest package first
    SizeSmallest,
    /// Package identifier, A to Z
    PackageName,
}

impl SortMode {
    pub const ALL: [SortMode; 9] = [
        Self::NameAsc,
        Self::NameDesc,
        Self::InstallDateNewest,
        Self::InstallDateOldest,
        Self::UpdateDateNewest,
        Self::UpdateDateOldest,
        Self::SizeLargest,
        Self::SizeSmallest,
        Self::PackageName,
    ];

    /// Position of this mode in the settings option list
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    /// Mode at the given index, falling back to `NameAsc`
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Parse a sort mode from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "name" | "name_asc" => Some(Self::NameAsc),
            "name_desc" => Some(Self::NameDesc),
            "installed" | "install_date_newest" | "newest" => Some(Self::InstallDateNewest),
            "installed_oldest" | "install_date_oldest" | "oldest" => Some(Self::InstallDateOldest),
            "updated" | "update_date_newest" => Some(Self::UpdateDateNewest),
            "updated_oldest" | "update_date_oldest" => Some(Self::UpdateDateOldest),
            "size" | "size_largest" => Some(Self::SizeLargest),
            "size_smallest" => Some(Self::SizeSmallest),
            "package" | "package_name" => Some(Self::PackageName),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::NameAsc => "Name (A→Z)",
            Self::NameDesc => "Name (Z→A)",
            Self::InstallDateNewest => "Install Date (Newest)",
            Self::InstallDateOldest => "Install Date (Oldest)",
            Self::UpdateDateNewest => "Updated (Newest)",
            Self::UpdateDateOldest => "Updated (Oldest)",
            Self::SizeLargest => "Size (Largest)",
            Self::SizeSmallest => "Size (Smallest)",
            Self::PackageName => "Package Name",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// UI theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Follow the system setting
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub const ALL: [ThemeMode; 3] = [Self::System, Self::Light, Self::Dark];

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "system" => Some(Self::System),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
