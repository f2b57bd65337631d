//! Error handling for the CLI application

use std::fmt;

/// Errors raised by the command-line layer
#[derive(Debug)]
pub enum CliError {
    /// Input path does not exist or is not readable
    FileNotFound(String),
    /// Malformed glob pattern
    InvalidPattern(String),
    /// Configuration or language resources rejected
    ConfigError(String),
    /// One or more documents could not be summarized or written
    ProcessingError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::FileNotFound(path) => write!(f, "File not found: {path}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::ProcessingError(msg) => write!(f, "Processing error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<epitome_core::Error> for CliError {
    fn from(error: epitome_core::Error) -> Self {
        CliError::ConfigError(error.to_string())
    }
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
