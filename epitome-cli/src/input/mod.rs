//! Input handling module

pub mod file_reader;
pub mod glob_resolver;

pub use file_reader::FileReader;
pub use glob_resolver::resolve_patterns;

use rayon::prelude::*;
use std::path::PathBuf;

/// A document read from disk
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub path: PathBuf,
    /// Key under which the document is indexed
    pub name: String,
    pub text: String,
}

/// Extract every file on the current rayon pool, in input order
pub fn extract_all(files: &[PathBuf], reader: &FileReader) -> Vec<SourceDocument> {
    files
        .par_iter()
        .map(|path| SourceDocument {
            path: path.clone(),
            name: path.display().to_string(),
            text: reader.extract_text(path),
        })
        .collect()
}
