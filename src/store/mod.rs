pub mod csv_store;
pub mod migrations;
pub mod sqlite_store;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::path::Path;
use thiserror::Error;

use crate::config::StorageBackend;
use crate::models::{DailyRecord, ParseError};

pub use csv_store::CsvStore;
pub use sqlite_store::SqliteStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Row {row}: {source}")]
    BadRow {
        row: usize,
        #[source]
        source: ParseError,
    },

    #[error("Missing column '{0}'")]
    MissingColumn(String),

    #[error("Data written by a newer version (schema {found}, this build reads up to {supported})")]
    FutureSchema { found: u32, supported: u32 },
}

/// Durable home of the daily log. At most one record per date.
pub trait RecordStore {
    /// Read every record, failing on any storage or format problem.
    fn try_load(&self) -> Result<Vec<DailyRecord>, StoreError>;

    /// Replace the full record set. Implementations overwrite in place.
    fn save_all(&mut self, records: &[DailyRecord]) -> Result<(), StoreError>;

    /// Read every record; unreadable storage yields an empty log.
    fn load(&self) -> Vec<DailyRecord> {
        match self.try_load() {
            Ok(records) => records,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No data file yet, starting empty");
                Vec::new()
            }
            Err(e) => {
                log::warn!("Could not read records, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Drop any record with the same date, add `record`, persist everything.
    /// Unreadable storage fails the save and is left as it was.
    fn upsert(&mut self, record: DailyRecord) -> Result<(), StoreError> {
        let mut records = match self.try_load() {
            Ok(records) => records,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };
        records.retain(|r| r.date != record.date);
        log::info!("Saving entry for {}", record.date_str());
        records.push(record);
        records.sort_by_key(|r| r.date);
        self.save_all(&records)
    }

    fn get(&self, date: NaiveDate) -> Option<DailyRecord> {
        self.load().into_iter().find(|r| r.date == date)
    }
}

pub fn open(backend: StorageBackend, path: &Path) -> Result<Box<dyn RecordStore>> {
    log::debug!("Opening {:?} store at {:?}", backend, path);
    match backend {
        StorageBackend::Csv => Ok(Box::new(CsvStore::new(path))),
        StorageBackend::Sqlite => {
            let store = SqliteStore::open(path)
                .with_context(|| format!("Opening database at {:?}", path))?;
            Ok(Box::new(store))
        }
    }
}
