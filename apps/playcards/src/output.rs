//! Output files are written next to their destination and renamed into place,
//! so an interrupted run never leaves a truncated PDF behind.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::errors::AppError;

pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), AppError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| AppError::Io(e.error))?;

    debug!(path = %path.display(), bytes = contents.len(), "Wrote output file");
    Ok(())
}
