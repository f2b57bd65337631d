//! Validate command implementation

use crate::config::CliConfig;
use anyhow::Result;
use clap::Args;
use epitome_core::LanguageResources;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Configuration file to validate
    #[arg(short, long, value_name = "FILE", required_unless_present = "language_config")]
    pub config: Option<PathBuf>,

    /// Language resources file to validate
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        if let Some(path) = &self.config {
            println!("Validating configuration: {}", path.display());
            match CliConfig::from_file(path) {
                Ok(config) => {
                    println!("✓ Configuration is valid!");
                    println!("  Language: {}", config.summarizer.text.language);
                    println!(
                        "  Compression: {}%",
                        config.summarizer.selection.compression
                    );
                }
                Err(e) => {
                    println!("✗ Configuration is invalid!");
                    println!("  Error: {e:#}");
                    return Err(anyhow::anyhow!("Validation failed: {e:#}"));
                }
            }
        }

        if let Some(path) = &self.language_config {
            println!("Validating language resources: {}", path.display());
            match LanguageResources::from_file(path) {
                Ok(resources) => {
                    println!("✓ Language resources are valid!");
                    println!("  Language code: {}", resources.metadata.code);
                    println!("  Language name: {}", resources.metadata.name);
                    println!("  Stemming rules: {}", resources.stemming.rules.len());
                    println!("  Stop-words: {}", resources.stopwords.words.len());
                }
                Err(e) => {
                    println!("✗ Language resources are invalid!");
                    println!("  Error: {e}");
                    return Err(anyhow::anyhow!("Validation failed: {e}"));
                }
            }
        }

        Ok(())
    }
}
