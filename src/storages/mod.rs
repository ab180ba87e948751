//! Mapping store
//!
//! The whole record set lives in one JSON array. Every mutation is
//! read whole file → change in memory → write whole file; there is no
//! locking, so concurrent writers race and the last one wins.

pub mod backends;
pub mod models;

pub use backends::file::FileStorage;
pub use backends::memory::MemoryStorage;
pub use models::{DeviceTargets, MappingRecord, Targets};

use crate::errors::Result;

pub trait Storage: Send + Sync {
    /// Load every record, in file order.
    fn load(&self) -> Result<Vec<MappingRecord>>;

    /// Replace the stored set with `records`.
    fn save(&self, records: &[MappingRecord]) -> Result<()>;

    /// Human-readable location, used in log lines and messages.
    fn describe(&self) -> String;
}

/// Pretty JSON with a trailing newline, the on-disk form of a record set.
pub fn serialize_records(records: &[MappingRecord]) -> Result<String> {
    let mut json = serde_json::to_string_pretty(records)?;
    json.push('\n');
    Ok(json)
}
