//! Validation report artifact
//!
//! Each run that discovers at least one file leaves a CSV report behind,
//! one row per attempted extract, named after the run start time:
//! `Validation_<YYYYMMDD_HHMMSS>.csv`.

use crate::error::{EtlError, Result};
use crate::validate::ValidationOutcome;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

/// Render the report CSV content
fn report_csv(outcomes: &[ValidationOutcome]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for outcome in outcomes {
        writer.serialize(outcome)?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::Io(e.into_error()))
}

/// Write the validation report for a run
///
/// `started_at` stamps the file name at second granularity. Returns the
/// report path.
pub async fn write_report(
    outcomes: &[ValidationOutcome],
    report_dir: impl AsRef<Path>,
    started_at: DateTime<Utc>,
) -> Result<PathBuf> {
    let name = format!("Validation_{}.csv", started_at.format("%Y%m%d_%H%M%S"));
    let path = report_dir.as_ref().join(name);

    let content = report_csv(outcomes)?;
    tokio::fs::write(&path, content).await?;
    info!(report = %path.display(), rows = outcomes.len(), "Validation report written");

    Ok(path)
}
