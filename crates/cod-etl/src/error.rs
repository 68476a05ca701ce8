//! Error types for the COD ETL pipeline
//!
//! This module provides pipeline error types with clear, actionable messages
//! that help operators understand what went wrong and how to fix it.

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, EtlError>;

/// Comprehensive error type for pipeline operations
#[derive(Error, Debug)]
pub enum EtlError {
    /// Extract file name doesn't follow the expected naming convention
    #[error("Malformed extract name '{name}': {reason}. Expected '<country><source>*_<YYYYMM>_<YYYYMM>_<label>.csv' (e.g., 'ATSOF_202401_202401_extract.csv').")]
    MalformedIdentifier { name: String, reason: String },

    /// Harmonized artifact lacks a column the loader requires
    #[error("Column '{column}' missing from harmonized file '{file}'. Re-run the pipeline to regenerate the artifact.")]
    MissingColumn { file: String, column: String },

    /// CSV parsing or writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Store database operation failed
    #[error("Database error: {0}. Check the database file path and permissions.")]
    Database(#[from] rusqlite::Error),

    /// File name pattern could not be compiled
    #[error("Invalid file pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables.")]
    Config(String),

    /// Error from shared utilities
    #[error(transparent)]
    Common(#[from] cod_common::CodError),
}

impl EtlError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a malformed identifier error
    pub fn malformed_identifier(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            file: file.into(),
            column: column.into(),
        }
    }
}
