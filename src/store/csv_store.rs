use std::fs::File;
use std::path::{Path, PathBuf};

use crate::models::DailyRecord;
use crate::store::migrations::{COLUMNS, RawRow, migrate_row, record_from_row, record_to_row};
use crate::store::{RecordStore, StoreError};

/// Flat CSV file with a header row, rewritten in full on every save.
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and migrate every row. Also reports the oldest schema version seen.
    pub fn read_migrated(&self) -> Result<(Vec<DailyRecord>, Option<u32>), StoreError> {
        let file = File::open(&self.path)?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
        if !headers.iter().any(|h| h == "date") {
            return Err(StoreError::MissingColumn("date".to_string()));
        }

        let mut records = Vec::new();
        let mut oldest: Option<u32> = None;
        for (idx, row) in reader.records().enumerate() {
            let row = row?;
            // header is line 1
            let line = idx + 2;
            let mut raw: RawRow = headers
                .iter()
                .cloned()
                .zip(row.iter().map(|v| v.to_string()))
                .collect();

            let found = migrate_row(&mut raw).map_err(|e| at_line(e, line))?;
            oldest = Some(oldest.map_or(found, |o| o.min(found)));

            let record = record_from_row(&raw).map_err(|source| StoreError::BadRow {
                row: line,
                source,
            })?;
            records.push(record);
        }

        // Older files could hold the same date twice; keep the last one written.
        let mut deduped: Vec<DailyRecord> = Vec::with_capacity(records.len());
        for record in records {
            deduped.retain(|r| r.date != record.date);
            deduped.push(record);
        }
        deduped.sort_by_key(|r| r.date);
        Ok((deduped, oldest))
    }
}

fn at_line(err: StoreError, line: usize) -> StoreError {
    match err {
        StoreError::BadRow { source, .. } => StoreError::BadRow { row: line, source },
        other => other,
    }
}

impl RecordStore for CsvStore {
    fn try_load(&self) -> Result<Vec<DailyRecord>, StoreError> {
        let (records, oldest) = self.read_migrated()?;
        if let Some(v) = oldest {
            if v < super::migrations::SCHEMA_VERSION {
                log::debug!("{:?} has rows at schema v{}, upgraded in memory", self.path, v);
            }
        }
        Ok(records)
    }

    fn save_all(&mut self, records: &[DailyRecord]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(COLUMNS)?;
        for record in records {
            writer.write_record(record_to_row(record))?;
        }
        writer.flush()?;
        log::debug!("Wrote {} record(s) to {:?}", records.len(), self.path);
        Ok(())
    }
}
