//! Backup metadata table
//!
//! One row per backup file ever created, persisted to backup_records.json.
//! Every mutating call writes the whole table atomically before the in-memory
//! copy is replaced, so a failed write leaves no partial insert behind.

use std::cmp::Reverse;
use std::path::PathBuf;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::ApplisterError;

use super::file_io::{read_json, write_json_atomic};

/// Metadata about one backup file
///
/// A row only records that the file existed when it was written; the file may
/// have been removed externally since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupRecord {
    /// Auto-generated primary key; 0 until inserted
    pub id: u64,
    pub file_name: String,
    pub file_path: PathBuf,
    /// Creation time, epoch milliseconds
    pub created_at: i64,
    pub app_count: usize,
    /// Format label, e.g. "Markdown"
    pub format: String,
    #[serde(default)]
    pub is_auto_backup: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct BackupRecordData {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    records: Vec<BackupRecord>,
}

impl BackupRecordData {
    fn allocate_id(&mut self) -> u64 {
        let max_existing = self.records.iter().map(|r| r.id).max().unwrap_or(0);
        let id = self.next_id.max(max_existing + 1).max(1);
        self.next_id = id + 1;
        id
    }
}

/// Newest first; rows created in the same millisecond keep insertion order reversed
fn newest_first(records: &mut [BackupRecord]) {
    records.sort_by_key(|r| Reverse((r.created_at, r.id)));
}

/// Repository for backup metadata persistence
pub struct BackupRecordRepository {
    path: PathBuf,
    data: RwLock<BackupRecordData>,
}

impl BackupRecordRepository {
    /// Create a new repository backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BackupRecordData::default()),
        }
    }

    /// Load rows from disk
    pub fn load(&self) -> Result<(), ApplisterError> {
        let file_data: BackupRecordData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            ApplisterError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;
        *data = file_data;

        Ok(())
    }

    /// Apply a change to a copy of the table, persist it, then publish it
    fn mutate<R>(
        &self,
        change: impl FnOnce(&mut BackupRecordData) -> R,
    ) -> Result<R, ApplisterError> {
        let mut data = self.data.write().map_err(|e| {
            ApplisterError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let mut next = data.clone();
        let result = change(&mut next);
        write_json_atomic(&self.path, &next)?;
        *data = next;

        Ok(result)
    }

    /// Insert a row, assigning a fresh id
    pub fn insert(&self, mut record: BackupRecord) -> Result<BackupRecord, ApplisterError> {
        self.mutate(|data| {
            record.id = data.allocate_id();
            data.records.push(record.clone());
            record
        })
    }

    /// Get a row by id
    pub fn get(&self, id: u64) -> Result<Option<BackupRecord>, ApplisterError> {
        let data = self.data.read().map_err(|e| {
            ApplisterError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(data.records.iter().find(|r| r.id == id).cloned())
    }

    /// All rows, newest first
    pub fn get_all(&self) -> Result<Vec<BackupRecord>, ApplisterError> {
        let data = self.data.read().map_err(|e| {
            ApplisterError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let mut records = data.records.clone();
        newest_first(&mut records);
        Ok(records)
    }

    /// Automatic-backup rows, newest first
    pub fn get_auto_backups(&self) -> Result<Vec<BackupRecord>, ApplisterError> {
        let mut records = self.get_all()?;
        records.retain(|r| r.is_auto_backup);
        Ok(records)
    }

    /// Delete a row; returns whether it existed
    pub fn delete(&self, id: u64) -> Result<bool, ApplisterError> {
        self.mutate(|data| {
            let before = data.records.len();
            data.records.retain(|r| r.id != id);
            data.records.len() != before
        })
    }

    /// Delete every row whose id is listed; returns the number removed
    pub fn delete_by_ids(&self, ids: &[u64]) -> Result<usize, ApplisterError> {
        if ids.is_empty() {
            return Ok(0);
        }

        self.mutate(|data| {
            let before = data.records.len();
            data.records.retain(|r| !ids.contains(&r.id));
            before - data.records.len()
        })
    }

    /// Count rows
    pub fn count(&self) -> Result<usize, ApplisterError> {
        let data = self.data.read().map_err(|e| {
            ApplisterError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.records.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, BackupRecordRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("backup_records.json");
        let repo = BackupRecordRepository::new(path);
        (temp_dir, repo)
    }

    fn record(name: &str, created_at: i64, auto: bool) -> BackupRecord {
        BackupRecord {
            id: 0,
            file_name: name.to_string(),
            file_path: PathBuf::from("/tmp").join(name),
            created_at,
            app_count: 3,
            format: "JSON".to_string(),
            is_auto_backup: auto,
        }
    }

    #[test]
    fn test_insert_assigns_ids() {
        let (_temp, repo) = create_test_repo();

        let first = repo.insert(record("a.json", 10, false)).unwrap();
        let second = repo.insert(record("b.json", 20, false)).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(repo.count().unwrap(), 2);
    }

    #[test]
    fn test_get_all_newest_first() {
        let (_temp, repo) = create_test_repo();

        repo.insert(record("mid.json", 20, false)).unwrap();
        repo.insert(record("old.json", 10, true)).unwrap();
        repo.insert(record("new.json", 30, false)).unwrap();
        repo.insert(record("tie.json", 30, true)).unwrap();

        let all = repo.get_all().unwrap();
        let names: Vec<_> = all.iter().map(|r| r.file_name.as_str()).collect();
        assert_eq!(names, vec!["tie.json", "new.json", "mid.json", "old.json"]);
        assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let auto = repo.get_auto_backups().unwrap();
        assert_eq!(auto.len(), 2);
        assert!(auto.iter().all(|r| r.is_auto_backup));
    }

    #[test]
    fn test_persistence_round_trip() {
        let (temp, repo) = create_test_repo();
        repo.insert(record("a.json", 10, false)).unwrap();
        repo.insert(record("b.json", 20, true)).unwrap();

        let reloaded = BackupRecordRepository::new(temp.path().join("backup_records.json"));
        reloaded.load().unwrap();
        assert_eq!(reloaded.count().unwrap(), 2);

        // Ids keep increasing after a reload
        let next = reloaded.insert(record("c.json", 30, false)).unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let (_temp, repo) = create_test_repo();
        repo.insert(record("a.json", 10, false)).unwrap();
        let b = repo.insert(record("b.json", 20, false)).unwrap();

        assert!(repo.delete(b.id).unwrap());
        let c = repo.insert(record("c.json", 30, false)).unwrap();
        assert_eq!(c.id, 3);
    }

    #[test]
    fn test_delete() {
        let (_temp, repo) = create_test_repo();
        let a = repo.insert(record("a.json", 10, false)).unwrap();

        assert!(repo.delete(a.id).unwrap());
        assert!(!repo.delete(a.id).unwrap());
        assert!(repo.get(a.id).unwrap().is_none());
    }

    #[test]
    fn test_delete_by_ids() {
        let (_temp, repo) = create_test_repo();
        let a = repo.insert(record("a.json", 10, true)).unwrap();
        let b = repo.insert(record("b.json", 20, true)).unwrap();
        let c = repo.insert(record("c.json", 30, true)).unwrap();

        assert_eq!(repo.delete_by_ids(&[a.id, c.id, 99]).unwrap(), 2);
        assert_eq!(repo.delete_by_ids(&[]).unwrap(), 0);

        let remaining = repo.get_all().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
    }

    #[test]
    fn test_failed_write_leaves_table_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        // The table path is a directory, so the atomic rename must fail
        let path = temp_dir.path().join("records");
        std::fs::create_dir_all(path.join("occupied")).unwrap();
        let repo = BackupRecordRepository::new(path);

        assert!(repo.insert(record("a.json", 10, false)).is_err());
        assert_eq!(repo.count().unwrap(), 0);
    }
}
