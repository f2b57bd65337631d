//! JSON output formatter

use super::OutputFormatter;
use anyhow::Result;
use epitome_core::{SentenceKind, SummarySentence};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs the summary as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    sentences: Vec<SentenceData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct SentenceData {
    pub text: String,
    /// Position of the sentence in the source document
    pub position: usize,
    pub kind: SentenceKind,
    /// Composite score; absent for titles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl<W: Write> JsonFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            sentences: Vec::new(),
        }
    }
}

impl<W: Write> OutputFormatter for JsonFormatter<W> {
    fn format_sentence(&mut self, sentence: &SummarySentence) -> Result<()> {
        self.sentences.push(SentenceData {
            text: sentence.text.clone(),
            position: sentence.position,
            kind: sentence.kind,
            score: sentence.composite,
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.writer, &self.sentences)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
