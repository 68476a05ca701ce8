//! Original-extract archival
//!
//! After an extract is harmonized, the original file is moved into the
//! archive with a single rename. The rename is atomic on POSIX filesystems,
//! so the file is never visible in both places; it also requires input and
//! archive to live on the same filesystem.

use crate::error::{EtlError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Move a processed extract into the archive under its own base name
///
/// An existing archive entry with the same name is replaced. Returns the
/// archived path.
pub async fn archive_extract(
    src: impl AsRef<Path>,
    archive_dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let src = src.as_ref();
    let file_name = src
        .file_name()
        .ok_or_else(|| EtlError::config(format!("'{}' has no file name", src.display())))?;
    let target = archive_dir.as_ref().join(file_name);

    tokio::fs::rename(src, &target).await?;
    debug!(file = %file_name.to_string_lossy(), "Extract archived");

    Ok(target)
}
