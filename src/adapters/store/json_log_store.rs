use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::core::errors::{Result, TrailError};
use crate::core::models::audit_record::AuditRecord;
use crate::core::traits::store::LogStore;

/// Log store that persists the whole record sequence as one JSON array
/// in a single file.
///
/// Every append is a read-modify-rewrite of the full sequence: fine at
/// audit-log volumes, but it means two unmediated concurrent writers
/// would overwrite each other. All access goes through the coordinator.
///
/// The rewrite lands in a temporary file in the same directory and is
/// renamed over the old one, so the file on disk always holds a complete
/// sequence: either the previous one, or the previous one plus exactly
/// the new record.
pub struct JsonLogStore {
    path: PathBuf,
}

impl JsonLogStore {
    /// Create a store backed by the file at `path`. The file and its
    /// parent directories are created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the backing file lives in, defaulting to the current
    /// directory for bare file names.
    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn storage_fault(&self, detail: impl std::fmt::Display) -> TrailError {
        TrailError::Storage {
            path: self.path.clone(),
            detail: detail.to_string(),
        }
    }

    /// Replace the backing file with `records`, atomically.
    fn rewrite(&self, records: &[AuditRecord]) -> Result<()> {
        let dir = self.parent_dir();
        if !dir.exists() {
            fs::create_dir_all(dir).map_err(|e| self.storage_fault(e))?;
        }

        let body = serde_json::to_string(records).map_err(|e| TrailError::Serialization {
            path: self.path.clone(),
            detail: format!("Failed to serialize record sequence: {e}"),
        })?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| self.storage_fault(e))?;
        tmp.write_all(body.as_bytes())
            .map_err(|e| self.storage_fault(e))?;
        tmp.persist(&self.path)
            .map_err(|e| self.storage_fault(e.error))?;

        Ok(())
    }
}

impl LogStore for JsonLogStore {
    fn append(&self, record: AuditRecord) -> Result<()> {
        let mut records = self.read_all()?;
        records.push(record);
        self.rewrite(&records)
    }

    fn read_all(&self) -> Result<Vec<AuditRecord>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            // Not created yet: an empty trail, not a fault
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.storage_fault(e)),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| TrailError::Serialization {
            path: self.path.clone(),
            detail: format!("Malformed record sequence: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::audit_record::{Actor, AuditAction, RecordDraft};
    use tempfile::TempDir;

    fn sample(id: u64, action: AuditAction) -> AuditRecord {
        RecordDraft::new(Actor::admin(1), action, "Client", "old", "new").into_record(id)
    }

    fn store_in(tmp: &TempDir) -> JsonLogStore {
        JsonLogStore::new(tmp.path().join("audit_trail.json"))
    }

    #[test]
    fn read_missing_file_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn read_empty_file_returns_empty() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        fs::write(store.path(), "").unwrap();

        assert!(store.read_all().unwrap().is_empty());

        fs::write(store.path(), "  \n").unwrap();
        assert!(store.read_all().unwrap().is_empty());
    }

    #[test]
    fn append_then_read_round_trips() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        let record = sample(1, AuditAction::Add);
        store.append(record.clone()).unwrap();

        let records = store.read_all().unwrap();
        assert_eq!(records, vec![record]);
    }

    #[test]
    fn appends_preserve_order() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.append(sample(1, AuditAction::Add)).unwrap();
        store.append(sample(2, AuditAction::Update)).unwrap();
        store.append(sample(3, AuditAction::Delete)).unwrap();

        let ids: Vec<u64> = store.read_all().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn append_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let store = JsonLogStore::new(tmp.path().join("nested/dir/audit_trail.json"));

        store.append(sample(1, AuditAction::Add)).unwrap();
        assert_eq!(store.read_all().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_content_is_a_serialization_fault() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);
        fs::write(store.path(), "{not a record sequence").unwrap();

        let err = store.read_all().unwrap_err();
        assert!(matches!(err, TrailError::Serialization { .. }));
    }

    #[test]
    fn file_holds_a_single_json_aggregate() {
        let tmp = TempDir::new().unwrap();
        let store = store_in(&tmp);

        store.append(sample(1, AuditAction::Add)).unwrap();
        store.append(sample(2, AuditAction::Update)).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert!(parsed.is_array());
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }
}
