//! Atomic summary files
//!
//! Each summary is rendered into a temporary file in the output directory
//! and renamed into place, so an interrupted run never leaves a partial
//! summary behind.

use super::{JsonFormatter, OutputFormatter, TextFormatter};
use crate::config::{OutputConfig, OutputFormat};
use anyhow::{Context, Result};
use epitome_core::Summary;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes one summary file per input document
#[derive(Debug, Clone)]
pub struct SummaryWriter {
    directory: PathBuf,
    suffix: String,
    format: OutputFormat,
}

impl SummaryWriter {
    pub fn new(config: &OutputConfig) -> Self {
        Self {
            directory: config.directory.clone(),
            suffix: config.suffix.clone(),
            format: config.format,
        }
    }

    /// Create the output directory if needed
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                self.directory.display()
            )
        })
    }

    /// `<directory>/<input stem><suffix>.<ext>`
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());
        self.directory
            .join(format!("{stem}{}.{}", self.suffix, self.format.extension()))
    }

    /// Write the summary of `input` and return the file written
    pub fn write(&self, input: &Path, summary: &Summary) -> Result<PathBuf> {
        let target = self.output_path(input);
        let mut temp = NamedTempFile::new_in(&self.directory).with_context(|| {
            format!(
                "Failed to create temporary file in {}",
                self.directory.display()
            )
        })?;

        {
            let writer = BufWriter::new(temp.as_file_mut());
            let mut formatter: Box<dyn OutputFormatter + '_> = match self.format {
                OutputFormat::Text => Box::new(TextFormatter::new(writer)),
                OutputFormat::Json => Box::new(JsonFormatter::new(writer)),
            };
            for sentence in summary.sentences() {
                formatter.format_sentence(sentence)?;
            }
            formatter.finish()?;
        }

        temp.persist(&target)
            .with_context(|| format!("Failed to write {}", target.display()))?;
        log::debug!("Wrote {}", target.display());
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use epitome_core::{IndexBuilder, Summarizer, SummarizerConfig};
    use tempfile::TempDir;

    fn summary(text: &str) -> Summary {
        let summarizer = Summarizer::from_config(&SummarizerConfig::default()).unwrap();
        let mut builder = IndexBuilder::new(summarizer.normalizer().clone());
        let id = builder.add_document("doc", text);
        summarizer.summarize_document(text, id, &builder.build())
    }

    fn writer(dir: &Path, format: OutputFormat) -> SummaryWriter {
        SummaryWriter::new(&OutputConfig {
            directory: dir.join("out"),
            format,
            ..OutputConfig::default()
        })
    }

    #[test]
    fn test_output_path() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer(temp_dir.path(), OutputFormat::Text);
        assert_eq!(
            writer.output_path(Path::new("corpus/istoria.txt")),
            temp_dir.path().join("out").join("istoria_summary.txt")
        );

        let json = self::writer(temp_dir.path(), OutputFormat::Json);
        assert_eq!(
            json.output_path(Path::new("istoria.md")),
            temp_dir.path().join("out").join("istoria_summary.json")
        );
    }

    #[test]
    fn test_write_text_summary() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer(temp_dir.path(), OutputFormat::Text);
        writer.prepare().unwrap();

        let text = "ΤΙΤΛΟΣ\n\nΠρώτη πρόταση. Δεύτερη πρόταση με περισσότερες λέξεις εδώ.";
        let path = writer.write(Path::new("titlos.txt"), &summary(text)).unwrap();

        assert_eq!(
            fs::read_to_string(path).unwrap(),
            "Δεύτερη πρόταση με περισσότερες λέξεις εδώ.\n"
        );
        // Only the summary remains in the directory.
        assert_eq!(fs::read_dir(temp_dir.path().join("out")).unwrap().count(), 1);
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let writer = writer(temp_dir.path(), OutputFormat::Json);
        writer.prepare().unwrap();
        let target = writer.output_path(Path::new("a.txt"));
        fs::write(&target, "old").unwrap();

        writer.write(Path::new("a.txt"), &summary("")).unwrap();
        assert_eq!(fs::read_to_string(target).unwrap().trim(), "[]");
    }
}
