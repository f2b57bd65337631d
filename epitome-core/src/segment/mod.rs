//! Document segmentation into paragraphs and tagged sentences

mod scanner;
mod segmenter;
mod types;

pub use scanner::{BoundaryScanner, TerminatorScanner, UnicodeScanner};
pub use segmenter::Segmenter;
pub use types::{Document, Paragraph, Sentence, SentenceKind};
