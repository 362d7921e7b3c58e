//! Scan store backed by a single JSON file.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{newest_first, ScanStore};
use crate::error::StorageError;
use crate::models::scan::ScanRecord;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Database {
    #[serde(default)]
    next_id: u64,
    #[serde(default)]
    scans: Vec<ScanRecord>,
}

/// Scan store persisted as one JSON document.
///
/// The whole file is rewritten on every change, through a temporary file in
/// the same directory that replaces the original once fully written. The
/// in-memory state only changes after that write succeeds.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    db: Database,
}

impl JsonFileStore {
    /// Open a store, reading existing records. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let db = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Database::default(),
            Ok(content) => {
                let mut db: Database =
                    serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
                        path: path.display().to_string(),
                        reason: e.to_string(),
                    })?;
                // Files edited by hand may carry a stale counter.
                let max_id = db.scans.iter().map(|r| r.id).max().unwrap_or(0);
                db.next_id = db.next_id.max(max_id);
                db
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No scan database at {}, starting empty", path.display());
                Database::default()
            }
            Err(source) => {
                return Err(StorageError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };

        info!("Opened scan database {} ({} scans)", path.display(), db.scans.len());
        Ok(Self { path, db })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `next` to disk, then adopt it as the current state.
    fn commit(&mut self, next: Database) -> Result<(), StorageError> {
        self.persist(&next)?;
        self.db = next;
        Ok(())
    }

    fn persist(&self, db: &Database) -> Result<(), StorageError> {
        let io_err = |source: std::io::Error| StorageError::Io {
            path: self.path.display().to_string(),
            source,
        };

        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(io_err)?;

        let content = serde_json::to_vec_pretty(db).map_err(|e| StorageError::Corrupt {
            path: self.path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(&content).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        debug!("Wrote {} scans to {}", db.scans.len(), self.path.display());
        Ok(())
    }
}

impl ScanStore for JsonFileStore {
    fn save(&mut self, mut record: ScanRecord) -> Result<u64, StorageError> {
        let mut next = self.db.clone();
        next.next_id += 1;
        record.id = next.next_id;
        next.scans.push(record);
        self.commit(next)?;
        Ok(self.db.next_id)
    }

    fn get_all(&self) -> Result<Vec<ScanRecord>, StorageError> {
        let mut records = self.db.scans.clone();
        newest_first(&mut records);
        Ok(records)
    }

    fn delete(&mut self, id: u64) -> Result<(), StorageError> {
        if !self.db.scans.iter().any(|r| r.id == id) {
            return Ok(());
        }
        let mut next = self.db.clone();
        next.scans.retain(|r| r.id != id);
        self.commit(next)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        let next = Database {
            next_id: self.db.next_id,
            scans: Vec::new(),
        };
        self.commit(next)
    }
}
