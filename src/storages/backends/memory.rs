use parking_lot::Mutex;

use crate::errors::Result;
use crate::storages::{MappingRecord, Storage};

/// In-memory store. Counts writes so callers can check that an
/// operation left the set untouched.
#[derive(Default)]
pub struct MemoryStorage {
    records: Mutex<Vec<MappingRecord>>,
    saves: Mutex<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<MappingRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            saves: Mutex::new(0),
        }
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Vec<MappingRecord>> {
        Ok(self.records.lock().clone())
    }

    fn save(&self, records: &[MappingRecord]) -> Result<()> {
        *self.records.lock() = records.to_vec();
        *self.saves.lock() += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}
