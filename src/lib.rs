pub mod detector;
pub mod error;
pub mod loader;
pub mod parser;
pub mod report;

use std::path::Path;

pub use detector::{find_duplicates, DuplicateProp, DuplicateReport};
pub use error::ScanError;

/// Result of scanning one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    ContainerNotFound,
    Scanned(DuplicateReport),
}

impl ScanOutcome {
    pub fn has_duplicates(&self) -> bool {
        matches!(self, ScanOutcome::Scanned(r) if !r.is_clean())
    }
}

pub fn scan_source(source: &str, marker: &str) -> ScanOutcome {
    match parser::parse_styles(source, marker) {
        Some(tree) => ScanOutcome::Scanned(find_duplicates(&tree)),
        None => ScanOutcome::ContainerNotFound,
    }
}

pub fn scan_file(path: &Path, marker: &str) -> Result<ScanOutcome, ScanError> {
    let source = loader::load_source(path)?;
    Ok(scan_source(&source, marker))
}
