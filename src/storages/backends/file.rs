use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::errors::{LinkregError, Result};
use crate::storages::{MappingRecord, Storage, serialize_records};

pub struct FileStorage {
    file_path: PathBuf,
}

impl FileStorage {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        FileStorage {
            file_path: file_path.into(),
        }
    }

    fn parse_error(&self, cause: impl std::fmt::Display) -> LinkregError {
        LinkregError::parse(format!(
            "Failed to parse mapping file {}: {}",
            self.file_path.display(),
            cause
        ))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Vec<MappingRecord>> {
        let content = match fs::read_to_string(&self.file_path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "Mapping file {} not found, starting empty",
                    self.file_path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(LinkregError::file_operation(format!(
                    "Failed to read mapping file {}: {}",
                    self.file_path.display(),
                    e
                )));
            }
        };

        if content.trim().is_empty() {
            debug!("Mapping file {} is empty", self.file_path.display());
            return Ok(Vec::new());
        }

        // 先解析成 Value，才能区分“不是数组”和“记录字段错误”
        let value: Value = serde_json::from_str(&content).map_err(|e| self.parse_error(e))?;
        if !value.is_array() {
            return Err(self.parse_error(format!(
                "expected a JSON array of mapping records, found {}",
                json_kind(&value)
            )));
        }

        let records: Vec<MappingRecord> =
            serde_json::from_value(value).map_err(|e| self.parse_error(e))?;

        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.code.as_str()) {
                warn!(
                    "Mapping file {} contains duplicate code '{}'",
                    self.file_path.display(),
                    record.code
                );
            }
        }

        info!(
            "Loaded {} mapping records from {}",
            records.len(),
            self.file_path.display()
        );
        Ok(records)
    }

    fn save(&self, records: &[MappingRecord]) -> Result<()> {
        let json = serialize_records(records)?;

        if let Some(parent) = self.file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.file_path, json).map_err(|e| {
            LinkregError::file_operation(format!(
                "Failed to write mapping file {}: {}",
                self.file_path.display(),
                e
            ))
        })?;

        info!(
            "Saved {} mapping records to {}",
            records.len(),
            self.file_path.display()
        );
        Ok(())
    }

    fn describe(&self) -> String {
        self.file_path.display().to_string()
    }
}
