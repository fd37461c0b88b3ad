use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::ScanError;

/// Read the whole input file into memory.
pub fn load_source(path: &Path) -> Result<String, ScanError> {
    let text = fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), bytes = text.len(), "loaded source");
    Ok(text)
}
