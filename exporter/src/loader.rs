//! Reads the raw profile bytes from disk

use crate::error::{ExportError, Result};
use std::path::Path;
use tracing::debug;

/// Read the whole file at `path`.
///
/// Every I/O failure (missing file, permissions, directory, short read) maps
/// to [`ExportError::Read`]; no retries.
pub async fn read_profile_bytes(path: &Path) -> Result<Vec<u8>> {
    let data = tokio::fs::read(path)
        .await
        .map_err(|source| ExportError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("Read {} bytes from {}", data.len(), path.display());
    Ok(data)
}
