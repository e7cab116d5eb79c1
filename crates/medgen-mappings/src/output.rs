//! Atomic file output.
//!
//! Every report and table is written to a temporary file in the
//! destination directory and persisted only once complete, so a failed
//! run never leaves a truncated output behind.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::types::{MappingError, MappingResult};

/// Runs `write` against a temporary file and atomically moves it to
/// `outpath` on success. On failure the temporary file is removed and
/// `outpath` is left untouched.
pub(crate) fn write_atomic<F>(outpath: &Path, write: F) -> MappingResult<()>
where
    F: FnOnce(&mut File) -> MappingResult<()>,
{
    let dir = match outpath.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    write(tmp.as_file_mut())?;
    tmp.as_file_mut().flush()?;
    tmp.persist(outpath).map_err(|e| MappingError::Io(e.error))?;
    Ok(())
}
