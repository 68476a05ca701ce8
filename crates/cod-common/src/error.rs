//! Error types shared across COD crates

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for shared COD operations
pub type Result<T> = std::result::Result<T, CodError>;

/// Error type for the shared foundation crate
#[derive(Error, Debug)]
pub enum CodError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CodError {
    /// Create a file-read error carrying the offending path
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}
