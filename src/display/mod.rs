//! Display formatting for terminal output
//!
//! Tables for app and backup lists, detail views, restore summaries and the
//! settings listing.

pub mod apps;
pub mod backup;
pub mod restore;
pub mod settings;

pub use apps::{format_app_details, format_app_table, format_counts};
pub use backup::{format_backup_details, format_backup_list};
pub use restore::format_restore_result;
pub use settings::{format_setting_help, format_settings};
