//! Error types for epitome-core
//!
//! The text pipeline itself (normalization, stemming, segmentation, scoring
//! and selection) is total and never fails. Errors only arise while loading
//! configuration, language resources or a persisted index.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by configuration and resource loading
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A configuration option holds an unacceptable value
    #[error("Invalid value for option '{option}': {reason}")]
    InvalidOption {
        /// Dotted key of the offending option, e.g. `selection.compression`
        option: &'static str,
        /// Human-readable explanation
        reason: String,
    },

    /// Unsupported language requested
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Language resource file is inconsistent
    #[error("Invalid language resources: {0}")]
    InvalidLanguageResources(String),

    /// Term index could not be built, saved or restored
    #[error("Index error: {0}")]
    Index(String),

    /// I/O failure on a named path
    #[error("Failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidOption {
            option,
            reason: reason.into(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for epitome-core operations
pub type Result<T> = std::result::Result<T, Error>;
