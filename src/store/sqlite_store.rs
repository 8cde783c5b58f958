use rusqlite::{Connection, params};
use std::path::Path;
use std::str::FromStr;

use crate::models::{DailyRecord, FoodPortion, Intensity, ParseError, WorkoutType};
use crate::store::migrations::run_migrations;
use crate::store::{RecordStore, StoreError};

/// `daily_records` table keyed by date.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Self::with_connection(conn)
    }

    pub fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    fn insert(conn: &Connection, r: &DailyRecord) -> Result<(), StoreError> {
        conn.execute(
            "INSERT OR REPLACE INTO daily_records
                (date, workout_done, workout_type, workout_duration, intensity, protein,
                 food_quality, food_portion, water, sleep, stress, mood, calories, carbs, fats,
                 updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, datetime('now'))",
            params![
                r.date_str(),
                r.workout_done as i32,
                r.workout_type.as_str(),
                r.workout_duration,
                r.intensity.as_str(),
                r.protein,
                r.food_quality,
                r.food_portion.as_str(),
                r.water,
                r.sleep,
                r.stress,
                r.mood,
                r.calories,
                r.carbs,
                r.fats,
            ],
        )?;
        Ok(())
    }
}

fn bad(row: usize) -> impl Fn(ParseError) -> StoreError {
    move |source| StoreError::BadRow { row, source }
}

impl RecordStore for SqliteStore {
    fn try_load(&self) -> Result<Vec<DailyRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT date, workout_done, workout_type, workout_duration, intensity, protein,
                    food_quality, food_portion, water, sleep, stress, mood, calories, carbs, fats
             FROM daily_records ORDER BY date",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i32>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, u32>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, f64>(5)?,
                row.get::<_, u8>(6)?,
                row.get::<_, String>(7)?,
                row.get::<_, f64>(8)?,
                row.get::<_, f64>(9)?,
                row.get::<_, u8>(10)?,
                row.get::<_, u8>(11)?,
                (
                    row.get::<_, Option<f64>>(12)?,
                    row.get::<_, Option<f64>>(13)?,
                    row.get::<_, Option<f64>>(14)?,
                ),
            ))
        })?;

        let mut result = Vec::new();
        for (idx, r) in rows.enumerate() {
            let (
                date,
                workout_done,
                workout_type,
                workout_duration,
                intensity,
                protein,
                food_quality,
                food_portion,
                water,
                sleep,
                stress,
                mood,
                (calories, carbs, fats),
            ) = r?;
            let line = idx + 1;
            result.push(DailyRecord {
                date: crate::models::record::parse_date(&date).map_err(bad(line))?,
                workout_done: workout_done != 0,
                workout_type: WorkoutType::from_str(&workout_type).map_err(bad(line))?,
                workout_duration,
                intensity: Intensity::from_str(&intensity).map_err(bad(line))?,
                protein,
                food_quality,
                food_portion: FoodPortion::from_str(&food_portion).map_err(bad(line))?,
                water,
                sleep,
                stress,
                mood,
                calories,
                carbs,
                fats,
            });
        }
        Ok(result)
    }

    fn save_all(&mut self, records: &[DailyRecord]) -> Result<(), StoreError> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM daily_records", [])?;
        for record in records {
            Self::insert(&tx, record)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn upsert(&mut self, record: DailyRecord) -> Result<(), StoreError> {
        log::info!("Saving entry for {}", record.date_str());
        Self::insert(&self.conn, &record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, day).unwrap()
    }

    fn memory_store() -> SqliteStore {
        SqliteStore::with_connection(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn empty_database_loads_empty() {
        assert!(memory_store().load().is_empty());
    }

    #[test]
    fn upsert_then_load_roundtrips() {
        let mut store = memory_store();
        let mut r = DailyRecord::new(d(4));
        r.workout_done = true;
        r.workout_duration = 50;
        r.protein = 130.0;
        r.fats = Some(70.0);
        store.upsert(r.clone()).unwrap();
        assert_eq!(store.load(), vec![r.clone()]);
        assert_eq!(store.get(d(4)), Some(r));
    }

    #[test]
    fn upsert_same_date_replaces() {
        let mut store = memory_store();
        let mut first = DailyRecord::new(d(4));
        first.mood = 1;
        first.carbs = Some(300.0);
        let mut second = DailyRecord::new(d(4));
        second.mood = 5;
        store.upsert(first).unwrap();
        store.upsert(second.clone()).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, vec![second]);
    }

    #[test]
    fn save_all_replaces_everything_in_date_order() {
        let mut store = memory_store();
        store.upsert(DailyRecord::new(d(1))).unwrap();
        store
            .save_all(&[DailyRecord::new(d(9)), DailyRecord::new(d(3))])
            .unwrap();
        let dates: Vec<_> = store.load().into_iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(3), d(9)]);
    }

    #[test]
    fn file_backed_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("fitweek.db");
        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.upsert(DailyRecord::new(d(10))).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.load().len(), 1);
    }
}
