//! Plain text output formatter

use super::OutputFormatter;
use anyhow::Result;
use epitome_core::SummarySentence;
use std::io::Write;

/// One sentence per line, each terminated by a newline
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputFormatter for TextFormatter<W> {
    fn format_sentence(&mut self, sentence: &SummarySentence) -> Result<()> {
        writeln!(self.writer, "{}", sentence.text)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
