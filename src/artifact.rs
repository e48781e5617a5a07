//! Writing output artifacts without partial overwrites

use crate::error::BuildError;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Write `contents` to `path` through a temporary file in the same directory.
///
/// The destination is only replaced by the final rename, so a failure leaves
/// any existing file untouched. Missing parent directories are created.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), BuildError> {
    let io_error = |e: std::io::Error| BuildError::Io(format!("{}: {}", path.display(), e));

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_error)?;

    let mut file = NamedTempFile::new_in(parent).map_err(io_error)?;
    file.write_all(contents.as_bytes()).map_err(io_error)?;
    file.flush().map_err(io_error)?;
    file.persist(path).map_err(|e| io_error(e.error))?;
    Ok(())
}
