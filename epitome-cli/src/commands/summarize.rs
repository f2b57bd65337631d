//! Summarize command implementation

use super::{build_thread_pool, init_logging, load_language_resources};
use crate::config::{CliConfig, OutputFormat};
use crate::error::CliError;
use crate::input::{extract_all, resolve_patterns, FileReader, SourceDocument};
use crate::output::SummaryWriter;
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use epitome_core::{
    default_normalizer, CorpusIndex, DocumentId, IndexBuilder, PositionMode, Summarizer,
    TermMode, TermStatistics,
};
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Arguments for the summarize command
#[derive(Debug, Args)]
pub struct SummarizeArgs {
    /// Input files, glob patterns or directories
    #[arg(short, long, value_name = "FILE/PATTERN/DIR", required = true, num_args = 1..)]
    pub input: Vec<String>,

    /// Output directory [default: summaries]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Previously saved corpus index; built from the inputs when absent
    #[arg(long, value_name = "FILE")]
    pub index: Option<PathBuf>,

    /// Percentage of sentences to discard (0-100)
    #[arg(long, value_name = "PERCENT")]
    pub compression: Option<u32>,

    /// Sentences with this many words or fewer are never selected
    #[arg(long, value_name = "N")]
    pub min_words: Option<usize>,

    /// Term-importance scoring mode
    #[arg(long, value_enum)]
    pub term_mode: Option<TermModeArg>,

    /// Positional scoring mode
    #[arg(long, value_enum)]
    pub position_mode: Option<PositionModeArg>,

    /// Re-insert titles and subtitles into the summaries
    #[arg(long)]
    pub show_titles: bool,

    /// Summary file format
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Encoding label of the input files (e.g. windows-1253)
    #[arg(long, value_name = "LABEL")]
    pub encoding: Option<String>,

    /// External language resources file
    #[arg(long, value_name = "FILE")]
    pub language_config: Option<PathBuf>,

    /// Number of worker threads (default: CPU count)
    #[arg(short = 't', long, value_name = "COUNT")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TermModeArg {
    /// Term frequency times corpus inverse document frequency
    Corpus,
    /// Term frequency times in-document inverse sentence frequency
    Local,
}

impl From<TermModeArg> for TermMode {
    fn from(arg: TermModeArg) -> Self {
        match arg {
            TermModeArg::Corpus => TermMode::Corpus,
            TermModeArg::Local => TermMode::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PositionModeArg {
    /// Boost the first sentence of each paragraph
    ParagraphOpener,
    /// Reward sentences near the start of the document and paragraph
    NormalizedPosition,
}

impl From<PositionModeArg> for PositionMode {
    fn from(arg: PositionModeArg) -> Self {
        match arg {
            PositionModeArg::ParagraphOpener => PositionMode::ParagraphOpener,
            PositionModeArg::NormalizedPosition => PositionMode::NormalizedPosition,
        }
    }
}

impl SummarizeArgs {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn resolve_config(&self) -> Result<CliConfig> {
        let mut config = CliConfig::load(self.config.as_deref())?;
        let summarizer = &mut config.summarizer;

        if let Some(compression) = self.compression {
            summarizer.selection.compression = compression;
        }
        if let Some(min_words) = self.min_words {
            summarizer.selection.min_words = min_words;
        }
        if let Some(mode) = self.term_mode {
            summarizer.scoring.term_mode = mode.into();
        }
        if let Some(mode) = self.position_mode {
            summarizer.scoring.position_mode = mode.into();
        }
        if self.show_titles {
            summarizer.selection.show_titles = true;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if let Some(output) = &self.output {
            config.output.directory = output.clone();
        }
        if let Some(threads) = self.threads {
            config.performance.worker_threads = threads;
        }

        config.summarizer.validate().map_err(CliError::from)?;
        Ok(config)
    }

    /// Execute the summarize command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {self:?}");

        let config = self.resolve_config()?;
        let resources = load_language_resources(
            self.language_config.as_deref(),
            &config.summarizer.text.language,
        )?;
        let normalizer = default_normalizer(&config.summarizer, &resources);
        let summarizer = Summarizer::with_resources(&config.summarizer, &resources, normalizer);

        let files = resolve_patterns(&self.input)?;
        let reader = FileReader::new(self.encoding.as_deref())?;
        let writer = SummaryWriter::new(&config.output);
        check_output_collisions(&writer, &files)?;
        writer.prepare()?;

        log::info!(
            "Summarizing {} files ({}) into {}",
            files.len(),
            reader.encoding_name(),
            config.output.directory.display()
        );

        let pool = build_thread_pool(config.performance.worker_threads)?;
        let (written, failures) = pool.install(|| -> Result<(usize, usize)> {
            let documents = extract_all(&files, &reader);
            let index = self.corpus_index(&summarizer, &documents)?;
            Ok(summarize_all(&summarizer, &documents, &index, &writer, self.quiet))
        })?;

        if !self.quiet {
            println!(
                "Wrote {written} summaries to {}",
                config.output.directory.display()
            );
        }

        if failures > 0 {
            return Err(CliError::ProcessingError(format!(
                "{failures} of {} documents failed",
                files.len()
            ))
            .into());
        }
        Ok(())
    }

    /// Load the saved index, or index every input before any scoring starts
    fn corpus_index(
        &self,
        summarizer: &Summarizer,
        documents: &[SourceDocument],
    ) -> Result<CorpusIndex> {
        if let Some(path) = &self.index {
            log::info!("Loading corpus index from {}", path.display());
            return CorpusIndex::load(path)
                .with_context(|| format!("Failed to load index: {}", path.display()));
        }

        let mut builder = IndexBuilder::new(summarizer.normalizer().clone());
        builder.add_documents(
            documents
                .iter()
                .map(|d| (d.name.as_str(), d.text.as_str()))
                .collect(),
        );
        Ok(builder.build())
    }
}

/// Id of a document in the index.
///
/// Documents missing from a loaded index get an id past the end, for which
/// every term frequency is zero.
fn document_id(index: &CorpusIndex, name: &str) -> DocumentId {
    index.document_id(name).unwrap_or_else(|| {
        log::warn!("'{name}' is not in the corpus index; term scores will be zero");
        DocumentId::new(index.total_documents())
    })
}

/// Fail when two inputs would be written to the same summary file
fn check_output_collisions(writer: &SummaryWriter, files: &[PathBuf]) -> Result<()> {
    let mut targets: HashMap<PathBuf, &Path> = HashMap::with_capacity(files.len());
    for file in files {
        let target = writer.output_path(file);
        if let Some(previous) = targets.insert(target.clone(), file) {
            return Err(CliError::ProcessingError(format!(
                "{} and {} would both be written to {}",
                previous.display(),
                file.display(),
                target.display()
            ))
            .into());
        }
    }
    Ok(())
}

/// Summarize and write every document, returning (written, failed) counts
fn summarize_all(
    summarizer: &Summarizer,
    documents: &[SourceDocument],
    index: &CorpusIndex,
    writer: &SummaryWriter,
    quiet: bool,
) -> (usize, usize) {
    let progress = ProgressReporter::new(documents.len() as u64, quiet);

    let results: Vec<Result<PathBuf>> = documents
        .par_iter()
        .map(|document| {
            let id = document_id(index, &document.name);
            let summary = summarizer.summarize_document(&document.text, id, index);
            let result = writer.write(&document.path, &summary);
            progress.document_completed(&display_name(&document.path));
            result
        })
        .collect();
    progress.finish();

    let mut written = 0;
    let mut failures = 0;
    for (document, result) in documents.iter().zip(results) {
        match result {
            Ok(_) => written += 1,
            Err(e) => {
                log::error!("{}: {e:#}", document.path.display());
                failures += 1;
            }
        }
    }
    (written, failures)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
