//! COD ETL Library
//!
//! Incremental ingestion of retail point-of-sale extracts into a harmonized
//! SQLite store.
//!
//! # Overview
//!
//! The pipeline turns raw per-country CSV extracts into one canonical
//! `store_offtake` table:
//!
//! - **Tracking**: the archive directory is the system of record; scanning
//!   it rebuilds the processed set (file name -> content fingerprint)
//! - **Discovery**: input files matching the extract naming convention and
//!   not yet archived are queued, in name order
//! - **Validation**: every attempted file is checked for the required
//!   columns and recorded in a per-run validation report
//! - **Harmonization**: passing extracts gain the metadata encoded in their
//!   file name and are written out as `CDM_<stem>.csv` artifacts
//! - **Archival**: processed originals move into the archive atomically
//! - **Load**: the store table is dropped and rebuilt from the complete
//!   artifact corpus on every non-empty run
//!
//! # Processing model
//!
//! Runs are incremental by file NAME: an extract whose name is already
//! archived is never picked up again, even with different content. Failures
//! are isolated per file, so one bad extract cannot stall the rest of a
//! run. The store load is a full rebuild, which makes runs idempotent at
//! the table level.
//!
//! # Example
//!
//! ```no_run
//! use cod_etl::config::PipelineConfig;
//!
//! #[tokio::main]
//! async fn main() -> cod_etl::Result<()> {
//!     let config = PipelineConfig::for_base_dir(".");
//!     let summary = cod_etl::pipeline::run(&config).await?;
//!     println!("{} new extracts, {} passed", summary.discovered, summary.passed);
//!     Ok(())
//! }
//! ```

pub mod archive;
pub mod config;
pub mod discovery;
pub mod error;
pub mod extract;
pub mod harmonize;
pub mod identity;
pub mod pipeline;
pub mod report;
pub mod store;
pub mod tracker;
pub mod validate;

// Re-export commonly used types
pub use error::{EtlError, Result};
pub use pipeline::RunSummary;
