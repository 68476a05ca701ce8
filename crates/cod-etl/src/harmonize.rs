//! Harmonization into the canonical data model
//!
//! A validated extract is enriched with the metadata encoded in its file
//! name plus a load timestamp, and written out as a `CDM_<stem>.csv`
//! artifact. Original columns are preserved in file order; the derived
//! columns are appended after them.

use crate::error::{EtlError, Result};
use crate::extract::Extract;
use crate::identity::ExtractIdentity;
use std::path::{Path, PathBuf};

/// Columns appended to every harmonized artifact, in output order
pub const DERIVED_COLUMNS: [&str; 6] = [
    "Country",
    "Source",
    "Unique_Store_ID",
    "Load_Timestamp",
    "Period_Start",
    "Period_End",
];

/// Substitute Banner value when the extract has no Banner column
const BANNER_FALLBACK: &str = "N/A";

/// Render the harmonized CSV content for a validated extract
///
/// `load_timestamp` is an RFC 3339 UTC timestamp taken when the extract is
/// processed; every row of the artifact carries the same value.
pub fn harmonized_csv(
    extract: &Extract,
    identity: &ExtractIdentity,
    load_timestamp: &str,
) -> Result<Vec<u8>> {
    let store_id_idx = extract
        .column_index("Store_ID")
        .ok_or_else(|| EtlError::missing_column(&identity.file_name, "Store_ID"))?;
    let banner_idx = extract.column_index("Banner");

    let mut writer = csv::Writer::from_writer(Vec::new());

    let header: Vec<&str> = extract
        .headers()
        .iter()
        .map(String::as_str)
        .chain(DERIVED_COLUMNS)
        .collect();
    writer.write_record(&header)?;

    for record in extract.records() {
        let store_id = record.get(store_id_idx).unwrap_or_default();
        let banner = banner_idx
            .and_then(|idx| record.get(idx))
            .unwrap_or(BANNER_FALLBACK);
        let unique_store_id = format!("{store_id}_{banner}");

        let mut row: Vec<&str> = record.iter().collect();
        row.push(&identity.country);
        row.push(&identity.source);
        row.push(&unique_store_id);
        row.push(load_timestamp);
        row.push(&identity.period_start);
        row.push(&identity.period_end);
        writer.write_record(&row)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::Io(e.into_error()))
}

/// Write the harmonized artifact for an extract into the output directory
///
/// Returns the path of the written `CDM_<stem>.csv` file.
pub async fn write_artifact(
    output_dir: impl AsRef<Path>,
    extract: &Extract,
    identity: &ExtractIdentity,
    load_timestamp: &str,
) -> Result<PathBuf> {
    let content = harmonized_csv(extract, identity, load_timestamp)?;
    let path = output_dir.as_ref().join(identity.artifact_name());
    tokio::fs::write(&path, content).await?;
    Ok(path)
}
