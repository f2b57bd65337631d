//! Index command implementation

use super::{init_logging, load_language_resources};
use crate::config::CliConfig;
use crate::input::{extract_all, resolve_patterns, FileReader};
use anyhow::{Context, Result};
use clap::Args;
use epitome_core::{default_normalizer, CorpusIndex, IndexBuilder};
use std::path::PathBuf;

/// Arguments for the index command
#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Input files, glob patterns or directories
    #[arg(short, long, value_name = "FILE/PATTERN/DIR", required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Index file to write
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Configuration file (language and stop-word stage)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Encoding label of the input files (e.g. windows-1253)
    #[arg(long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// External language resources file
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Suppress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl IndexArgs {
    /// Execute the index command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);

        let index = self.build_index()?;
        index
            .save(&self.output)
            .with_context(|| format!("Failed to save index: {}", self.output.display()))?;

        if !self.quiet {
            println!(
                "✓ Indexed {} documents ({} distinct terms) into {}",
                index.document_count(),
                index.term_count(),
                self.output.display()
            );
        }
        Ok(())
    }

    fn build_index(&self) -> Result<CorpusIndex> {
        let config = CliConfig::load(self.config.as_deref())?;
        let resources = load_language_resources(
            self.language_config.as_deref(),
            &config.summarizer.text.language,
        )?;
        let normalizer = default_normalizer(&config.summarizer, &resources);

        let files = resolve_patterns(&self.input)?;
        let reader = FileReader::new(self.encoding.as_deref())?;
        log::info!("Indexing {} files", files.len());

        let documents = extract_all(&files, &reader);
        let mut builder = IndexBuilder::new(normalizer);
        builder.add_documents(documents.into_iter().map(|d| (d.name, d.text)).collect());
        Ok(builder.build())
    }
}
