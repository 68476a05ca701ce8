//! Processed-file tracking
//!
//! The archive directory is the system of record for what has already been
//! ingested: every successfully processed extract is moved there under its
//! original name. A scan of the archive therefore reconstructs the processed
//! set from disk on every run, with no separate state file to drift out of
//! sync.
//!
//! Each archived file is fingerprinted during the scan. Skip decisions are
//! made on file NAME only; the digests are kept for inventory display and
//! duplicate-content diagnostics.

use crate::error::Result;
use cod_common::fingerprint::fingerprint_file;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Archived extracts, keyed by original file name
#[derive(Debug, Clone, Default)]
pub struct ProcessedSet {
    entries: BTreeMap<String, String>,
}

impl ProcessedSet {
    /// Scan the archive directory and fingerprint every `.csv` file in it
    ///
    /// Non-CSV entries and subdirectories are ignored. The directory must
    /// exist; callers ensure the pipeline layout before scanning.
    pub async fn scan(archive_dir: impl AsRef<Path>) -> Result<Self> {
        let archive_dir = archive_dir.as_ref();
        let mut entries = BTreeMap::new();

        let mut dir = tokio::fs::read_dir(archive_dir).await?;
        while let Some(entry) = dir.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if !name.ends_with(".csv") {
                continue;
            }

            let digest = fingerprint_file(entry.path()).await?;
            debug!(file = %name, digest = %digest, "Archived extract fingerprinted");
            entries.insert(name, digest);
        }

        Ok(Self { entries })
    }

    /// Whether an extract with this name has already been processed
    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Fingerprint of an archived extract, if present
    pub fn digest_for(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Whether any archived extract has this content fingerprint
    pub fn contains_digest(&self, digest: &str) -> bool {
        self.entries.values().any(|d| d == digest)
    }

    /// Archived entries in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, digest)| (name.as_str(), digest.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
