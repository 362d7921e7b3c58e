//! In-memory scan store.

use super::{newest_first, ScanStore};
use crate::error::StorageError;
use crate::models::scan::ScanRecord;

/// Scan store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<ScanRecord>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScanStore for MemoryStore {
    fn save(&mut self, mut record: ScanRecord) -> Result<u64, StorageError> {
        self.next_id += 1;
        record.id = self.next_id;
        self.records.push(record);
        Ok(self.next_id)
    }

    fn get_all(&self) -> Result<Vec<ScanRecord>, StorageError> {
        let mut records = self.records.clone();
        newest_first(&mut records);
        Ok(records)
    }

    fn delete(&mut self, id: u64) -> Result<(), StorageError> {
        self.records.retain(|r| r.id != id);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.records.clear();
        Ok(())
    }
}
