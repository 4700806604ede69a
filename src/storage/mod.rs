//! Storage layer for applister
//!
//! JSON file storage with atomic writes, and the backup metadata table.

pub mod backup_records;
pub mod file_io;

pub use backup_records::{BackupRecord, BackupRecordRepository};
pub use file_io::{read_json, write_json_atomic, write_text_atomic};
