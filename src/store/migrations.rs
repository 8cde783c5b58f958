//! Schema versions of the daily log and how older rows are brought forward.
//!
//! - v0: unversioned files from earlier releases. Columns vary; water may be a
//!   cup count (`water_cups`), booleans may be `True`/`False`.
//! - v1: `schema_version` column, water always in liters.
//! - v2: optional `calories`, `carbs`, `fats` columns.

use rusqlite::{Connection, OptionalExtension, params};
use std::collections::HashMap;

use crate::models::record::parse_date;
use crate::models::{DailyRecord, ParseError};
use crate::store::StoreError;

pub const SCHEMA_VERSION: u32 = 2;

/// Legacy cup-count files assumed a 250 ml cup.
pub const LITERS_PER_CUP: f64 = 0.25;

pub const COLUMNS: [&str; 16] = [
    "schema_version",
    "date",
    "workout_done",
    "workout_type",
    "workout_duration",
    "intensity",
    "protein",
    "food_quality",
    "food_portion",
    "water",
    "sleep",
    "stress",
    "mood",
    "calories",
    "carbs",
    "fats",
];

/// One CSV row keyed by header name.
pub type RawRow = HashMap<String, String>;

fn detect_version(row: &RawRow) -> Result<u32, ParseError> {
    match row.get("schema_version").map(|v| v.trim()) {
        Some(v) if !v.is_empty() => v.parse().map_err(|_| ParseError::InvalidValue {
            field: "schema_version".to_string(),
            value: v.to_string(),
        }),
        _ => Ok(0),
    }
}

fn is_blank(row: &RawRow, key: &str) -> bool {
    row.get(key).is_none_or(|v| v.trim().is_empty())
}

fn v0_to_v1(row: &mut RawRow) -> Result<(), ParseError> {
    if is_blank(row, "water") {
        if let Some(cups) = row.get("water_cups").filter(|v| !v.trim().is_empty()) {
            let cups = parse_f64("water_cups", cups)?;
            row.insert("water".to_string(), (cups * LITERS_PER_CUP).to_string());
        }
    }
    row.remove("water_cups");

    // Fill columns some older layouts never had with the form's starting values.
    let defaults = record_to_row(&DailyRecord::new(chrono::NaiveDate::MIN));
    for (key, value) in COLUMNS.iter().zip(defaults) {
        if *key == "date" || *key == "schema_version" {
            continue;
        }
        if is_blank(row, key) && !value.is_empty() {
            row.insert(key.to_string(), value);
        }
    }
    Ok(())
}

fn v1_to_v2(row: &mut RawRow) -> Result<(), ParseError> {
    for key in ["calories", "carbs", "fats"] {
        row.entry(key.to_string()).or_default();
    }
    Ok(())
}

/// Upgrade `row` in place to [`SCHEMA_VERSION`]. Returns the version it started at.
pub fn migrate_row(row: &mut RawRow) -> Result<u32, StoreError> {
    let found = detect_version(row).map_err(|e| StoreError::BadRow { row: 0, source: e })?;
    if found > SCHEMA_VERSION {
        return Err(StoreError::FutureSchema {
            found,
            supported: SCHEMA_VERSION,
        });
    }

    let mut version = found;
    while version < SCHEMA_VERSION {
        let step = match version {
            0 => v0_to_v1(row),
            _ => v1_to_v2(row),
        };
        step.map_err(|e| StoreError::BadRow { row: 0, source: e })?;
        version += 1;
    }
    row.insert("schema_version".to_string(), SCHEMA_VERSION.to_string());
    Ok(found)
}

// ─── Field codecs ────────────────────────────────────────────────────────────

fn field<'a>(row: &'a RawRow, key: &str) -> &'a str {
    row.get(key).map(|v| v.trim()).unwrap_or("")
}

fn invalid(key: &str, value: &str) -> ParseError {
    ParseError::InvalidValue {
        field: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_f64(key: &str, value: &str) -> Result<f64, ParseError> {
    value.trim().parse::<f64>().map_err(|_| invalid(key, value))
}

fn parse_opt_f64(key: &str, value: &str) -> Result<Option<f64>, ParseError> {
    if value.is_empty() || value.eq_ignore_ascii_case("nan") {
        Ok(None)
    } else {
        parse_f64(key, value).map(Some)
    }
}

/// Integers may have been written as floats ("4.0").
fn parse_whole(key: &str, value: &str) -> Result<u32, ParseError> {
    let v = parse_f64(key, value)?;
    if v.is_finite() && v >= 0.0 && v <= u32::MAX as f64 {
        Ok(v.round() as u32)
    } else {
        Err(invalid(key, value))
    }
}

fn parse_small(key: &str, value: &str) -> Result<u8, ParseError> {
    u8::try_from(parse_whole(key, value)?).map_err(|_| invalid(key, value))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ParseError> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" | "1.0" => Ok(true),
        "false" | "0" | "no" | "0.0" | "" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

pub fn record_from_row(row: &RawRow) -> Result<DailyRecord, ParseError> {
    let record = DailyRecord {
        date: parse_date(field(row, "date"))?,
        workout_done: parse_bool("workout_done", field(row, "workout_done"))?,
        workout_type: field(row, "workout_type").parse()?,
        workout_duration: parse_whole("workout_duration", field(row, "workout_duration"))?,
        intensity: field(row, "intensity").parse()?,
        protein: parse_f64("protein", field(row, "protein"))?,
        food_quality: parse_small("food_quality", field(row, "food_quality"))?,
        food_portion: field(row, "food_portion").parse()?,
        water: parse_f64("water", field(row, "water"))?,
        sleep: parse_f64("sleep", field(row, "sleep"))?,
        stress: parse_small("stress", field(row, "stress"))?,
        mood: parse_small("mood", field(row, "mood"))?,
        calories: parse_opt_f64("calories", field(row, "calories"))?,
        carbs: parse_opt_f64("carbs", field(row, "carbs"))?,
        fats: parse_opt_f64("fats", field(row, "fats"))?,
    };
    record.validate()?;
    Ok(record)
}

/// Values in [`COLUMNS`] order.
pub fn record_to_row(r: &DailyRecord) -> Vec<String> {
    let opt = |v: Option<f64>| v.map(|x| x.to_string()).unwrap_or_default();
    vec![
        SCHEMA_VERSION.to_string(),
        r.date_str(),
        r.workout_done.to_string(),
        r.workout_type.as_str().to_string(),
        r.workout_duration.to_string(),
        r.intensity.as_str().to_string(),
        r.protein.to_string(),
        r.food_quality.to_string(),
        r.food_portion.as_str().to_string(),
        r.water.to_string(),
        r.sleep.to_string(),
        r.stress.to_string(),
        r.mood.to_string(),
        opt(r.calories),
        opt(r.carbs),
        opt(r.fats),
    ]
}

// ─── SQLite schema ───────────────────────────────────────────────────────────

pub fn run_migrations(conn: &Connection) -> Result<(), StoreError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS daily_records (
            date             TEXT PRIMARY KEY,
            workout_done     INTEGER NOT NULL DEFAULT 0,
            workout_type     TEXT NOT NULL
                             CHECK(workout_type IN ('Lower body','Upper body','Abdominals')),
            workout_duration INTEGER NOT NULL DEFAULT 0,
            intensity        TEXT NOT NULL CHECK(intensity IN ('Easy','Medium','Hard')),
            protein          REAL NOT NULL DEFAULT 0,
            food_quality     INTEGER NOT NULL CHECK(food_quality BETWEEN 1 AND 5),
            food_portion     TEXT NOT NULL
                             CHECK(food_portion IN ('Under-eat','Normal','Over-eat')),
            water            REAL NOT NULL DEFAULT 0,
            sleep            REAL NOT NULL DEFAULT 0,
            stress           INTEGER NOT NULL CHECK(stress BETWEEN 1 AND 5),
            mood             INTEGER NOT NULL CHECK(mood BETWEEN 1 AND 5),
            updated_at       TEXT DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS app_meta (
            key   TEXT PRIMARY KEY,
            value TEXT
        );
    ",
    )?;

    let stored: Option<String> = conn
        .query_row(
            "SELECT value FROM app_meta WHERE key = 'schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()?;

    // A fresh database has just been created at v1 shape.
    let mut version = match stored {
        Some(v) => v.parse::<u32>().map_err(|_| StoreError::BadRow {
            row: 0,
            source: ParseError::InvalidValue {
                field: "schema_version".to_string(),
                value: v.clone(),
            },
        })?,
        None => 1,
    };

    if version > SCHEMA_VERSION {
        return Err(StoreError::FutureSchema {
            found: version,
            supported: SCHEMA_VERSION,
        });
    }

    if version < 2 {
        log::info!("Migrating database schema v{} -> v2", version);
        conn.execute_batch(
            "
            ALTER TABLE daily_records ADD COLUMN calories REAL;
            ALTER TABLE daily_records ADD COLUMN carbs REAL;
            ALTER TABLE daily_records ADD COLUMN fats REAL;
        ",
        )?;
        version = 2;
    }

    conn.execute(
        "INSERT INTO app_meta (key, value) VALUES ('schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value = ?1",
        params![version.to_string()],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn legacy_layout() -> RawRow {
        raw(&[
            ("date", "2024-01-15"),
            ("workout_done", "True"),
            ("workout_type", "Upper body"),
            ("workout_duration", "45"),
            ("intensity", "Hard"),
            ("protein", "120"),
            ("food_quality", "4"),
            ("food_portion", "Normal"),
            ("water", "2.5"),
            ("sleep", "7"),
            ("stress", "2"),
            ("mood", "5"),
        ])
    }

    #[test]
    fn unversioned_legacy_layout_migrates() {
        let mut row = legacy_layout();
        assert_eq!(migrate_row(&mut row).unwrap(), 0);
        assert_eq!(row["schema_version"], "2");

        let r = record_from_row(&row).unwrap();
        assert!(r.workout_done);
        assert_eq!(r.workout_duration, 45);
        assert_eq!(r.protein, 120.0);
        assert_eq!(r.water, 2.5);
        assert_eq!(r.calories, None);
    }

    #[test]
    fn cup_counts_become_liters() {
        let mut row = legacy_layout();
        row.remove("water");
        row.insert("water_cups".to_string(), "8".to_string());
        migrate_row(&mut row).unwrap();
        assert!(!row.contains_key("water_cups"));
        let r = record_from_row(&row).unwrap();
        assert_eq!(r.water, 2.0);
    }

    #[test]
    fn missing_columns_take_form_defaults() {
        let mut row = raw(&[
            ("date", "2024-01-16"),
            ("workout_done", "False"),
            ("protein", "80.0"),
            ("water", "1.5"),
            ("sleep", "6.0"),
            ("stress", "3.0"),
            ("mood", "3.0"),
            ("calories", "2100"),
        ]);
        migrate_row(&mut row).unwrap();
        let r = record_from_row(&row).unwrap();
        assert_eq!(r.food_quality, 4);
        assert_eq!(r.food_portion.as_str(), "Normal");
        assert_eq!(r.intensity.as_str(), "Easy");
        assert_eq!(r.stress, 3);
        assert_eq!(r.calories, Some(2100.0));
    }

    #[test]
    fn future_versions_are_refused() {
        let mut row = legacy_layout();
        row.insert("schema_version".to_string(), "9".to_string());
        assert!(matches!(
            migrate_row(&mut row),
            Err(StoreError::FutureSchema { found: 9, .. })
        ));
    }

    #[test]
    fn current_rows_roundtrip_through_columns() {
        let mut r = DailyRecord::new(chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        r.calories = Some(1950.5);
        r.water = 2.3;
        let row: RawRow = COLUMNS
            .iter()
            .map(|c| c.to_string())
            .zip(record_to_row(&r))
            .collect();
        let mut migrated = row.clone();
        assert_eq!(migrate_row(&mut migrated).unwrap(), SCHEMA_VERSION);
        assert_eq!(record_from_row(&migrated).unwrap(), r);
    }

    #[test]
    fn out_of_range_slider_is_a_bad_row() {
        let mut row = legacy_layout();
        row.insert("mood".to_string(), "7".to_string());
        migrate_row(&mut row).unwrap();
        assert!(record_from_row(&row).is_err());
    }

    #[test]
    fn sqlite_migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
        let v: String = conn
            .query_row(
                "SELECT value FROM app_meta WHERE key = 'schema_version'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(v, "2");
    }
}
