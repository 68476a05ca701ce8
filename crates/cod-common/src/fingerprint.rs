//! Content fingerprinting for delta-load change detection
//!
//! The fingerprint is the stable digest used to describe a file that has
//! already been ingested. It is a de-duplication key, not an integrity
//! guarantee; MD5 matches the digests recorded by earlier loads.

use crate::error::{CodError, Result};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Compute the fingerprint of a byte slice
pub fn fingerprint_bytes(data: &[u8]) -> String {
    let digest = md5::compute(data);
    format!("{:x}", digest)
}

/// Compute the fingerprint of a file's raw content
pub async fn fingerprint_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let mut file = tokio::fs::File::open(path)
        .await
        .map_err(|e| CodError::file_read(path, e))?;

    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)
        .await
        .map_err(|e| CodError::file_read(path, e))?;

    Ok(fingerprint_bytes(&buffer))
}
