//! New-extract discovery
//!
//! Scans the input directory for files that follow the extract naming
//! convention and have not been processed before. The skip decision is by
//! name only: a file whose name already sits in the archive is never
//! re-queued, even if its content changed.

use crate::error::Result;
use crate::tracker::ProcessedSet;
use regex::Regex;
use std::path::Path;
use tracing::{debug, info};

/// Names that qualify as extracts: `<origin>_<YYYYMM>_<YYYYMM>_<label>.csv`
pub const EXTRACT_NAME_PATTERN: &str = r"^.+_\d{6}_\d{6}_.+\.csv$";

/// Find unprocessed extract files in the input directory
///
/// Returns matching file names in lexicographic order so runs are
/// deterministic regardless of directory iteration order.
pub async fn discover_new(
    input_dir: impl AsRef<Path>,
    processed: &ProcessedSet,
) -> Result<Vec<String>> {
    let input_dir = input_dir.as_ref();
    let pattern = Regex::new(EXTRACT_NAME_PATTERN)?;
    let mut found = Vec::new();

    let mut dir = tokio::fs::read_dir(input_dir).await?;
    while let Some(entry) = dir.next_entry().await? {
        if !entry.file_type().await?.is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        if !pattern.is_match(&name) {
            debug!(file = %name, "Name does not match extract pattern, ignoring");
            continue;
        }

        if processed.contains_name(&name) {
            info!(file = %name, "Already processed, skipping");
            continue;
        }

        found.push(name);
    }

    found.sort();
    Ok(found)
}
