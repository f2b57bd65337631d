//! Content extraction
//!
//! Plain-text documents are decoded to UTF-8. Extraction never fails:
//! unreadable or unsupported files yield empty text and a warning, and the
//! summarizer treats them as empty documents.

use crate::error::CliError;
use anyhow::Result;
use encoding_rs::{Encoding, UTF_8};
use std::fs;
use std::path::Path;

const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text", "md"];

/// Reads documents as text in a fixed encoding
#[derive(Debug, Clone, Copy)]
pub struct FileReader {
    encoding: &'static Encoding,
}

impl Default for FileReader {
    fn default() -> Self {
        Self { encoding: UTF_8 }
    }
}

impl FileReader {
    /// Reader for an encoding label such as `windows-1253`; UTF-8 when `None`
    pub fn new(label: Option<&str>) -> Result<Self> {
        let encoding = match label {
            Some(label) => Encoding::for_label(label.as_bytes())
                .ok_or_else(|| CliError::ConfigError(format!("Unknown encoding: {label}")))?,
            None => UTF_8,
        };
        Ok(Self { encoding })
    }

    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Whether the extension names a format this reader understands
    pub fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                SUPPORTED_EXTENSIONS
                    .iter()
                    .any(|supported| ext.eq_ignore_ascii_case(supported))
            })
    }

    /// Extract the text of a document, or an empty string on failure
    pub fn extract_text(&self, path: &Path) -> String {
        if !Self::is_supported(path) {
            log::warn!("Unsupported format, treating as empty: {}", path.display());
            return String::new();
        }

        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Failed to read {}: {e}", path.display());
                return String::new();
            }
        };

        let (text, used, had_errors) = self.encoding.decode(&bytes);
        if had_errors {
            log::warn!(
                "Malformed {} sequences replaced in {}",
                used.name(),
                path.display()
            );
        }
        text.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_utf8_text() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("keimeno.txt");
        fs::write(&path, "Καλημέρα κόσμε.\nΔεύτερη γραμμή.").unwrap();

        let text = FileReader::default().extract_text(&path);
        assert_eq!(text, "Καλημέρα κόσμε.\nΔεύτερη γραμμή.");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bom.txt");
        fs::write(&path, "\u{feff}Αρχή.").unwrap();
        assert_eq!(FileReader::default().extract_text(&path), "Αρχή.");
    }

    #[test]
    fn test_legacy_greek_encoding() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("palio.txt");
        // "Αθήνα" in windows-1253
        fs::write(&path, [0xC1, 0xE8, 0xDE, 0xED, 0xE1]).unwrap();

        let reader = FileReader::new(Some("windows-1253")).unwrap();
        assert_eq!(reader.encoding_name(), "windows-1253");
        assert_eq!(reader.extract_text(&path), "Αθήνα");
    }

    #[test]
    fn test_unknown_encoding_label() {
        let error = FileReader::new(Some("klingon")).unwrap_err();
        assert!(error.to_string().contains("Unknown encoding"));
    }

    #[test]
    fn test_unsupported_and_missing_files_are_empty() {
        let temp_dir = TempDir::new().unwrap();
        let pdf = temp_dir.path().join("report.pdf");
        fs::write(&pdf, b"%PDF-1.4").unwrap();

        let reader = FileReader::default();
        assert_eq!(reader.extract_text(&pdf), "");
        assert_eq!(reader.extract_text(&temp_dir.path().join("missing.txt")), "");
    }

    #[test]
    fn test_supported_extensions() {
        assert!(FileReader::is_supported(Path::new("a.txt")));
        assert!(FileReader::is_supported(Path::new("a.TXT")));
        assert!(FileReader::is_supported(Path::new("notes.md")));
        assert!(!FileReader::is_supported(Path::new("a.docx")));
        assert!(!FileReader::is_supported(Path::new("README")));
    }
}
