//! In-memory record set loaded from JSON.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use super::CellValue;
use crate::error::{Result, TobyError};

/// A list of flat records, e.g. an extract of the HYG star catalogue.
///
/// Column order is the key order of the first record as written in the
/// source document.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<String>,
    records: Vec<Map<String, Value>>,
}

impl Dataset {
    /// Decode a JSON array of objects.
    ///
    /// # Errors
    /// Returns [`TobyError::Dataset`] on malformed JSON or when the top level
    /// is not an array of objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<Map<String, Value>> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    /// Read and decode a JSON dataset file.
    ///
    /// # Errors
    /// Returns [`TobyError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Dataset::from_json`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(TobyError::from)?;
        Self::from_json(&text)
    }

    pub fn from_records(records: Vec<Map<String, Value>>) -> Self {
        let columns = records
            .first()
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default();
        Self { columns, records }
    }

    /// Column names available for display.
    pub fn available_columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of records (excluding the header row).
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Field `column` of record `index`, empty if either is missing.
    pub fn value(&self, index: usize, column: &str) -> CellValue {
        self.records
            .get(index)
            .and_then(|record| record.get(column))
            .map(json_to_cell)
            .unwrap_or_default()
    }
}

fn json_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::String(s) => CellValue::Text(s.clone()),
        Value::Number(n) => n
            .as_f64()
            .map_or_else(|| CellValue::Text(n.to_string()), CellValue::Number),
        Value::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
