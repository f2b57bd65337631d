//! Output formatting module

use anyhow::Result;
use epitome_core::SummarySentence;

/// Trait for summary formatters
pub trait OutputFormatter {
    /// Format and output a single selected sentence
    fn format_sentence(&mut self, sentence: &SummarySentence) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod text;
pub mod writer;

pub use json::JsonFormatter;
pub use text::TextFormatter;
pub use writer::SummaryWriter;
