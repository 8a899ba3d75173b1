//! Write the compiled blob to disk.

use crate::error::CompileError;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Write `bytes` to `path`, replacing any existing file.
///
/// The data goes to a temporary file next to the destination which is then renamed over it,
/// so the destination is either the complete new blob or untouched.
pub fn write_output(path: &Path, bytes: &[u8]) -> Result<(), CompileError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp =
        tempfile::NamedTempFile::new_in(dir).map_err(|e| CompileError::io("create", path, e))?;
    tmp.write_all(bytes)
        .and_then(|_| tmp.flush())
        .map_err(|e| CompileError::io("write output to", path, e))?;
    tmp.persist(path)
        .map_err(|e| CompileError::io("create", path, e.error))?;
    info!(path = %path.display(), len = bytes.len(), "wrote output");
    Ok(())
}
