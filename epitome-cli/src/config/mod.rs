//! CLI configuration file
//!
//! The summarizer sections (`[weights]`, `[scoring]`, `[selection]`, ...) sit
//! at the top level next to the CLI-only `[output]` and `[performance]`
//! sections. The document is parsed once for each side.

use crate::error::CliError;
use anyhow::{Context, Result};
use epitome_core::config::describe_toml_error;
use epitome_core::SummarizerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Summary file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// One sentence per line
    #[default]
    Text,
    /// Sentences with position, kind and composite score
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliConfig {
    pub summarizer: SummarizerConfig,

    pub output: OutputConfig,

    pub performance: PerformanceConfig,
}

/// CLI-only sections; summarizer sections are ignored here
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CliSections {
    output: OutputConfig,
    performance: PerformanceConfig,
}

/// Output-related configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving the summary files
    pub directory: PathBuf,

    /// Appended to the input file stem
    pub suffix: String,

    pub format: OutputFormat,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("summaries"),
            suffix: "_summary".to_string(),
            format: OutputFormat::Text,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}

impl CliConfig {
    /// Load and validate a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let summarizer = SummarizerConfig::from_toml_str(content).map_err(CliError::from)?;
        let sections: CliSections = toml::from_str(content)
            .map_err(|e| CliError::ConfigError(describe_toml_error(content, &e)))?;

        Ok(Self {
            summarizer,
            output: sections.output,
            performance: sections.performance,
        })
    }

    /// Load `path` if given, otherwise use the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
