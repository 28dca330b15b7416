//! Replace-on-success file writes.

use std::io::Write;
use std::path::Path;

use landscape_core::{ObjectError, Result};

/// Write `data` to a temporary file next to `path`, then rename it over
/// `path`. On failure the destination keeps its previous contents.
pub fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let write_error = |source: std::io::Error| ObjectError::DestinationWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_error)?;
    tmp.write_all(data).map_err(write_error)?;
    tmp.as_file().sync_all().map_err(write_error)?;
    tmp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}
