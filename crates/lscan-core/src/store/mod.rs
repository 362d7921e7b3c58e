//! Persistence for saved label scans.

mod memory;
#[cfg(feature = "native")]
mod json_file;

pub use memory::MemoryStore;
#[cfg(feature = "native")]
pub use json_file::JsonFileStore;

use crate::error::StorageError;
use crate::models::scan::ScanRecord;

/// Storage for scan records.
pub trait ScanStore {
    /// Store a record and return its new id. Any id already on the record
    /// is ignored.
    fn save(&mut self, record: ScanRecord) -> Result<u64, StorageError>;

    /// All records, most recent first.
    fn get_all(&self) -> Result<Vec<ScanRecord>, StorageError>;

    /// Remove a record. Removing an unknown id is not an error.
    fn delete(&mut self, id: u64) -> Result<(), StorageError>;

    /// Remove every record.
    fn clear(&mut self) -> Result<(), StorageError>;

    /// Look up one record by id.
    fn get(&self, id: u64) -> Result<Option<ScanRecord>, StorageError> {
        Ok(self.get_all()?.into_iter().find(|r| r.id == id))
    }
}

/// Order records newest first; equal timestamps fall back to the later id.
pub(crate) fn newest_first(records: &mut [ScanRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}
