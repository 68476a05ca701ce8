//! Extract file parsing
//!
//! Reads a raw point-of-sale extract into memory as a header row plus data
//! records. Parsing is strict: ragged rows are surfaced as errors so a
//! damaged file fails validation instead of loading partial data.

use crate::error::Result;
use csv::StringRecord;

/// A parsed extract: header row plus data records
#[derive(Debug, Clone)]
pub struct Extract {
    headers: Vec<String>,
    records: Vec<StringRecord>,
}

impl Extract {
    /// Parse CSV content from raw bytes
    ///
    /// The first row is treated as the header row. An empty input yields an
    /// extract with no headers and no records.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(data);

        let headers = reader
            .headers()?
            .iter()
            .map(ToString::to_string)
            .collect();

        let records = reader
            .records()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { headers, records })
    }

    /// Column names in file order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data records in file order (header row excluded)
    pub fn records(&self) -> &[StringRecord] {
        &self.records
    }

    /// Position of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Whether a column with this exact name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.records.len()
    }
}
