//! SQLite store for harmonized offtake data
//!
//! Harmonized artifacts are loaded into a single `store_offtake` table with
//! a fixed 15-column schema. Loading is a full rebuild: the table is
//! dropped, recreated, and repopulated from EVERY `CDM_*.csv` artifact
//! present, so the table always reflects the complete harmonized corpus.

use crate::error::{EtlError, Result};
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// Canonical columns of `store_offtake`, in schema order
pub const CANONICAL_COLUMNS: [&str; 15] = [
    "Store_ID",
    "Store_Name",
    "City",
    "Volume",
    "Value",
    "Banner",
    "Street",
    "Post_Code",
    "Key_Account",
    "Country",
    "Source",
    "Unique_Store_ID",
    "Load_Timestamp",
    "Period_Start",
    "Period_End",
];

/// Canonical columns an artifact may legitimately lack; they load as NULL
const OPTIONAL_COLUMNS: [&str; 4] = ["Banner", "Street", "Post_Code", "Key_Account"];

const SCHEMA_SQL: &str = r#"
DROP TABLE IF EXISTS store_offtake;
CREATE TABLE store_offtake (
    Store_ID TEXT,
    Store_Name TEXT,
    City TEXT,
    Volume REAL,
    Value REAL,
    Banner TEXT,
    Street TEXT,
    Post_Code TEXT,
    Key_Account TEXT,
    Country TEXT,
    Source TEXT,
    Unique_Store_ID TEXT,
    Load_Timestamp TEXT,
    Period_Start TEXT,
    Period_End TEXT
);
"#;

const INSERT_SQL: &str = r#"
INSERT INTO store_offtake (
    Store_ID, Store_Name, City, Volume, Value,
    Banner, Street, Post_Code, Key_Account,
    Country, Source, Unique_Store_ID,
    Load_Timestamp, Period_Start, Period_End
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
"#;

/// Totals for one full reload
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadStats {
    /// Number of CDM artifacts loaded
    pub artifacts: usize,

    /// Total rows inserted across all artifacts
    pub rows: usize,
}

/// One row of the top-stores ranking
#[derive(Debug, Clone, Serialize)]
pub struct TopStore {
    #[serde(rename = "Store_Name")]
    pub store_name: String,

    #[serde(rename = "City")]
    pub city: String,

    #[serde(rename = "Volume")]
    pub volume: Option<f64>,

    #[serde(rename = "Value")]
    pub value: Option<f64>,

    #[serde(rename = "Unique_Store_ID")]
    pub unique_store_id: String,
}

/// Handle over the `store_offtake` table
pub struct StoreTable {
    conn: Connection,
}

impl StoreTable {
    /// Open (creating if needed) the store database at `db_path`
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(db_path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory store (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    /// Whether the `store_offtake` table exists yet
    pub fn has_table(&self) -> Result<bool> {
        let name: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'store_offtake'",
                [],
                |row| row.get(0),
            )
            .optional()?;

        Ok(name.is_some())
    }

    /// Drop and recreate the `store_offtake` table
    pub fn reset_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// Load one harmonized artifact into the table
    ///
    /// Canonical columns are mapped by header name: optional columns that
    /// are absent load as NULL, absent required or derived columns are a
    /// load error, and unknown extra columns are ignored. Rows are inserted
    /// in a single transaction; returns the inserted row count.
    pub fn load_artifact(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let mut reader = csv::Reader::from_path(path)?;
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(ToString::to_string)
            .collect();

        let mut indices = Vec::with_capacity(CANONICAL_COLUMNS.len());
        for column in CANONICAL_COLUMNS {
            let idx = headers.iter().position(|h| h == column);
            if idx.is_none() && !OPTIONAL_COLUMNS.contains(&column) {
                return Err(EtlError::missing_column(&file_name, column));
            }
            indices.push(idx);
        }

        let tx = self.conn.transaction()?;
        let mut count = 0;
        {
            let mut stmt = tx.prepare(INSERT_SQL)?;
            for record in reader.records() {
                let record = record?;
                let values = CANONICAL_COLUMNS
                    .into_iter()
                    .zip(&indices)
                    .map(|(column, idx)| cell_value(column, idx.and_then(|i| record.get(i))));
                stmt.execute(rusqlite::params_from_iter(values))?;
                count += 1;
            }
        }
        tx.commit()?;

        Ok(count)
    }

    /// Rebuild the table from every CDM artifact in the output directory
    ///
    /// Artifacts are loaded in name order. A failing artifact aborts the
    /// remaining load; the next full run rebuilds the table from scratch.
    pub fn load_all(&mut self, output_dir: impl AsRef<Path>) -> Result<LoadStats> {
        self.reset_schema()?;

        let mut artifacts = Vec::new();
        for entry in std::fs::read_dir(output_dir.as_ref())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with("CDM_") && name.ends_with(".csv") {
                artifacts.push(entry.path());
            }
        }
        artifacts.sort();

        let mut stats = LoadStats::default();
        for path in &artifacts {
            let rows = self.load_artifact(path)?;
            info!(artifact = %path.display(), rows, "Artifact loaded");
            stats.artifacts += 1;
            stats.rows += rows;
        }

        Ok(stats)
    }

    /// Total rows currently in the table
    pub fn count_rows(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM store_offtake", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Top stores by volume for one country and source system
    pub fn top_stores(&self, country: &str, source: &str, limit: usize) -> Result<Vec<TopStore>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT Store_Name, City, Volume, Value, Unique_Store_ID
            FROM store_offtake
            WHERE Country = ?1 AND Source = ?2
            ORDER BY Volume DESC
            LIMIT ?3
            "#,
        )?;

        let rows = stmt.query_map(params![country, source, limit as i64], |row| {
            Ok(TopStore {
                store_name: row.get(0)?,
                city: row.get(1)?,
                volume: row.get(2)?,
                value: row.get(3)?,
                unique_store_id: row.get(4)?,
            })
        })?;

        let stores = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(stores)
    }
}

/// Map a CSV cell to its SQLite value
///
/// Empty and absent cells load as NULL. `Volume` and `Value` cells parse to
/// REAL when numeric; non-numeric content is kept as text and left to
/// SQLite column affinity.
fn cell_value(column: &str, cell: Option<&str>) -> Value {
    let Some(cell) = cell else {
        return Value::Null;
    };
    if cell.is_empty() {
        return Value::Null;
    }

    if column == "Volume" || column == "Value" {
        if let Ok(number) = cell.trim().parse::<f64>() {
            return Value::Real(number);
        }
    }

    Value::Text(cell.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const FULL_ARTIFACT: &str = "\
Store_ID,Store_Name,City,Volume,Value,Banner,Street,Post_Code,Key_Account,Country,Source,Unique_Store_ID,Load_Timestamp,Period_Start,Period_End
123,Alpha,Vienna,10,20.5,BigMart,Main St,1010,KA1,AT,SOF,123_BigMart,2024-01-18T12:00:00Z,202401,202401
124,Beta,Graz,7,9,BigMart,Side St,8010,KA1,AT,SOF,124_BigMart,2024-01-18T12:00:00Z,202401,202401
";

    const MINIMAL_ARTIFACT: &str = "\
Store_ID,Store_Name,City,Volume,Value,Country,Source,Unique_Store_ID,Load_Timestamp,Period_Start,Period_End
200,Gamma,Linz,3,4,AT,SOF,200_N/A,2024-01-18T12:00:00Z,202401,202401
";

    fn write_artifact(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reset_schema_is_idempotent() {
        let store = StoreTable::open_in_memory().unwrap();

        assert!(!store.has_table().unwrap());
        store.reset_schema().unwrap();
        assert!(store.has_table().unwrap());
        store.reset_schema().unwrap();
        assert!(store.has_table().unwrap());
    }

    #[test]
    fn test_load_full_artifact() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_artifact(temp.path(), "CDM_a.csv", FULL_ARTIFACT);

        let mut store = StoreTable::open_in_memory().unwrap();
        store.reset_schema().unwrap();
        let rows = store.load_artifact(&path).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(store.count_rows().unwrap(), 2);

        // Volume landed as REAL
        let volume: f64 = store
            .conn
            .query_row(
                "SELECT Volume FROM store_offtake WHERE Store_ID = '123'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(volume, 10.0);
    }

    #[test]
    fn test_absent_optional_columns_load_as_null() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_artifact(temp.path(), "CDM_min.csv", MINIMAL_ARTIFACT);

        let mut store = StoreTable::open_in_memory().unwrap();
        store.reset_schema().unwrap();
        store.load_artifact(&path).unwrap();

        let nulls: i64 = store
            .conn
            .query_row(
                "SELECT COUNT(*) FROM store_offtake WHERE Banner IS NULL AND Street IS NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(nulls, 1);
    }

    #[test]
    fn test_absent_required_column_is_a_load_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_artifact(
            temp.path(),
            "CDM_bad.csv",
            "Store_ID,Store_Name,City,Volume,Value,Country,Source,Unique_Store_ID,Load_Timestamp,Period_Start\n1,A,V,1,2,AT,SOF,1_N/A,t,202401\n",
        );

        let mut store = StoreTable::open_in_memory().unwrap();
        store.reset_schema().unwrap();

        let err = store.load_artifact(&path).unwrap_err();
        assert!(matches!(err, EtlError::MissingColumn { ref column, .. } if column == "Period_End"));
    }

    #[test]
    fn test_unknown_extra_columns_are_ignored() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_artifact(
            temp.path(),
            "CDM_extra.csv",
            "Store_ID,Store_Name,City,Volume,Value,Region,Country,Source,Unique_Store_ID,Load_Timestamp,Period_Start,Period_End\n1,A,V,1,2,West,AT,SOF,1_N/A,t,202401,202401\n",
        );

        let mut store = StoreTable::open_in_memory().unwrap();
        store.reset_schema().unwrap();

        assert_eq!(store.load_artifact(&path).unwrap(), 1);
    }

    #[test]
    fn test_volume_cell_typing() {
        let temp = tempfile::tempdir().unwrap();
        let path = write_artifact(
            temp.path(),
            "CDM_types.csv",
            "Store_ID,Store_Name,City,Volume,Value,Country,Source,Unique_Store_ID,Load_Timestamp,Period_Start,Period_End\n\
             1,A,V,10.5,2,AT,SOF,1_N/A,t,202401,202401\n\
             2,B,G,,2,AT,SOF,2_N/A,t,202401,202401\n\
             3,C,L,n/a,2,AT,SOF,3_N/A,t,202401,202401\n",
        );

        let mut store = StoreTable::open_in_memory().unwrap();
        store.reset_schema().unwrap();
        store.load_artifact(&path).unwrap();

        let type_of = |store_id: &str| -> String {
            store
                .conn
                .query_row(
                    "SELECT typeof(Volume) FROM store_offtake WHERE Store_ID = ?1",
                    params![store_id],
                    |row| row.get(0),
                )
                .unwrap()
        };

        assert_eq!(type_of("1"), "real");
        assert_eq!(type_of("2"), "null");
        assert_eq!(type_of("3"), "text");
    }

    #[test]
    fn test_load_all_rebuilds_from_every_artifact() {
        let temp = tempfile::tempdir().unwrap();
        write_artifact(temp.path(), "CDM_a.csv", FULL_ARTIFACT);
        write_artifact(temp.path(), "CDM_b.csv", MINIMAL_ARTIFACT);
        write_artifact(temp.path(), "notes.txt", "ignored");

        let mut store = StoreTable::open_in_memory().unwrap();

        let stats = store.load_all(temp.path()).unwrap();
        assert_eq!(stats.artifacts, 2);
        assert_eq!(stats.rows, 3);

        // A second full load is a rebuild, not an append
        let stats = store.load_all(temp.path()).unwrap();
        assert_eq!(stats.rows, 3);
        assert_eq!(store.count_rows().unwrap(), 3);
    }

    #[test]
    fn test_top_stores_ranking() {
        let temp = tempfile::tempdir().unwrap();
        write_artifact(
            temp.path(),
            "CDM_rank.csv",
            "Store_ID,Store_Name,City,Volume,Value,Country,Source,Unique_Store_ID,Load_Timestamp,Period_Start,Period_End\n\
             1,Small,V,5,1,AT,SOF,1_N/A,t,202401,202401\n\
             2,Big,G,50,2,AT,SOF,2_N/A,t,202401,202401\n\
             3,Mid,L,20,3,AT,SOF,3_N/A,t,202401,202401\n\
             4,Other,P,99,4,DE,REW,4_N/A,t,202401,202401\n",
        );

        let mut store = StoreTable::open_in_memory().unwrap();
        store.load_all(temp.path()).unwrap();

        let top = store.top_stores("AT", "SOF", 2).unwrap();

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].store_name, "Big");
        assert_eq!(top[0].volume, Some(50.0));
        assert_eq!(top[1].store_name, "Mid");
    }

    #[test]
    fn test_top_stores_empty_when_no_match() {
        let store = StoreTable::open_in_memory().unwrap();
        store.reset_schema().unwrap();

        let top = store.top_stores("FR", "CAR", 5).unwrap();
        assert!(top.is_empty());
    }
}
