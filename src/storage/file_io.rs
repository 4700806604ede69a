//! File I/O utilities with atomic writes
//!
//! Provides file operations that leave the previous contents intact on failure.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::ApplisterError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, ApplisterError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path)
        .map_err(|e| ApplisterError::Storage(format!("Failed to open {}: {}", path.display(), e)))?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .map_err(|e| ApplisterError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, then rename)
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), ApplisterError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = prepare_temp_path(path)?;

    let file = File::create(&temp_path)
        .map_err(|e| ApplisterError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| ApplisterError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| ApplisterError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| ApplisterError::Storage(format!("Failed to sync data: {}", e)))?;

    commit_temp_file(&temp_path, path)
}

/// Write text to a file atomically (write to temp, then rename)
pub fn write_text_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), ApplisterError> {
    let path = path.as_ref();
    let temp_path = prepare_temp_path(path)?;

    let mut file = File::create(&temp_path)
        .map_err(|e| ApplisterError::Io(format!("Failed to create temp file: {}", e)))?;

    file.write_all(contents.as_bytes())
        .and_then(|_| file.sync_all())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ApplisterError::Io(format!("Failed to write {}: {}", path.display(), e))
        })?;

    commit_temp_file(&temp_path, path)
}

/// Ensure the parent directory exists and return the sibling temp path
fn prepare_temp_path(path: &Path) -> Result<PathBuf, ApplisterError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ApplisterError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    Ok(path.with_file_name(name))
}

fn commit_temp_file(temp_path: &Path, path: &Path) -> Result<(), ApplisterError> {
    fs::rename(temp_path, path).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        ApplisterError::Storage(format!("Failed to rename temp file: {}", e))
    })
}
