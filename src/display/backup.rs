//! Backup list display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::format_timestamp;
use crate::storage::BackupRecord;

#[derive(Tabled)]
struct BackupRow {
    id: u64,
    file: String,
    created: String,
    apps: usize,
    format: String,
    kind: &'static str,
}

impl From<&BackupRecord> for BackupRow {
    fn from(record: &BackupRecord) -> Self {
        Self {
            id: record.id,
            file: record.file_name.clone(),
            created: format_timestamp(record.created_at),
            apps: record.app_count,
            format: record.format.clone(),
            kind: if record.is_auto_backup { "auto" } else { "manual" },
        }
    }
}

/// Format backups as a table, in the order given
pub fn format_backup_list(records: &[BackupRecord]) -> String {
    if records.is_empty() {
        return "No backups found.".to_string();
    }

    let rows: Vec<BackupRow> = records.iter().map(BackupRow::from).collect();
    let mut table = Table::new(rows);
    table.with(Style::sharp());
    table.to_string()
}

/// Format a single backup's details
pub fn format_backup_details(record: &BackupRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Backup: {}\n", record.file_name));
    output.push_str(&format!("  ID:             {}\n", record.id));
    output.push_str(&format!("  Created:        {}\n", format_timestamp(record.created_at)));
    output.push_str(&format!("  Apps:           {}\n", record.app_count));
    output.push_str(&format!("  Format:         {}\n", record.format));
    output.push_str(&format!(
        "  Automatic:      {}\n",
        if record.is_auto_backup { "Yes" } else { "No" }
    ));
    output.push_str(&format!("  Path:           {}\n", record.file_path.display()));

    output
}
