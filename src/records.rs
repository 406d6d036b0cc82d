//! Reference records describing known medications.
//!
//! Records are read from a CSV file whose header names the four fields:
//!
//! ```text
//! name,indication,dosage,side_effects
//! paracetamol,"Pain relief, fever reduction",Take 1 to 2 tablets every 4 to 6 hours as needed,Rare
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub indication: String,
    pub dosage: String,
    pub side_effects: String,
}

impl Record {
    fn check_fields(&self, row: usize) -> Result<()> {
        // the other columns are enforced by the header; only the key must be non-blank
        if self.name.trim().is_empty() {
            return Err(Error::MissingField { row, field: "name" });
        }
        Ok(())
    }
}

/// In-memory record table keyed by lower-cased name
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: BTreeMap<String, Record>,
}

impl RecordStore {
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let store = Self::from_reader(file)?;
        debug!("Loaded {} records from {}", store.len(), path.display());
        Ok(store)
    }

    /// Parse CSV with a header row; any malformed row rejects the whole load
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut store = Self::default();
        for (idx, row) in csv_reader.deserialize::<Record>().enumerate() {
            // header is row 1
            let record = row?;
            record.check_fields(idx + 2)?;
            store.insert(record)?;
        }
        Ok(store)
    }

    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Result<Self> {
        let mut store = Self::default();
        for (idx, record) in records.into_iter().enumerate() {
            record.check_fields(idx + 1)?;
            store.insert(record)?;
        }
        Ok(store)
    }

    fn insert(&mut self, record: Record) -> Result<()> {
        let key = normalize_key(&record.name);
        if self.records.contains_key(&key) {
            return Err(Error::DuplicateRecord { name: record.name });
        }
        self.records.insert(key, record);
        Ok(())
    }

    /// Case-insensitive lookup by record name
    pub fn lookup(&self, key: &str) -> Option<&Record> {
        self.records.get(&normalize_key(key))
    }

    /// Lower-cased keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}
