//! Pipeline configuration
//!
//! Directory layout and database location for a pipeline run. Defaults match
//! the conventional layout rooted at the working directory:
//!
//! ```text
//! input_files/         incoming extracts
//! harmonized_output/   canonical CDM_*.csv artifacts
//! archive/             processed originals
//! reports/             per-run validation reports
//! cod_store_data.db    SQLite store
//! ```

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Configuration for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory scanned for new extract files
    pub input_dir: PathBuf,

    /// Directory receiving harmonized CDM_*.csv artifacts
    pub output_dir: PathBuf,

    /// Directory holding already-processed originals
    pub archive_dir: PathBuf,

    /// Directory receiving validation reports
    pub report_dir: PathBuf,

    /// Path of the SQLite store database
    pub db_path: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::for_base_dir(".")
    }
}

impl PipelineConfig {
    /// Create the conventional directory layout rooted at `base`
    pub fn for_base_dir(base: impl AsRef<Path>) -> Self {
        let base = base.as_ref();
        Self {
            input_dir: base.join("input_files"),
            output_dir: base.join("harmonized_output"),
            archive_dir: base.join("archive"),
            report_dir: base.join("reports"),
            db_path: base.join("cod_store_data.db"),
        }
    }

    /// Apply environment variable overrides to this configuration
    ///
    /// Environment variables:
    /// - `COD_INPUT_DIR`: Directory scanned for new extracts
    /// - `COD_OUTPUT_DIR`: Directory for harmonized artifacts
    /// - `COD_ARCHIVE_DIR`: Directory for processed originals
    /// - `COD_REPORT_DIR`: Directory for validation reports
    /// - `COD_DB_PATH`: SQLite store database path
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("COD_INPUT_DIR") {
            self.input_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("COD_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("COD_ARCHIVE_DIR") {
            self.archive_dir = PathBuf::from(dir);
        }

        if let Ok(dir) = std::env::var("COD_REPORT_DIR") {
            self.report_dir = PathBuf::from(dir);
        }

        if let Ok(path) = std::env::var("COD_DB_PATH") {
            self.db_path = PathBuf::from(path);
        }

        self
    }

    /// Load configuration from environment variables over the defaults
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Create every pipeline directory that does not exist yet
    ///
    /// Runs at the start of each pipeline run so a fresh base directory
    /// works without manual setup.
    pub async fn ensure_layout(&self) -> Result<()> {
        for dir in [
            &self.input_dir,
            &self.output_dir,
            &self.archive_dir,
            &self.report_dir,
        ] {
            tokio::fs::create_dir_all(dir).await?;
        }

        Ok(())
    }
}
