//! Extractive summarization for Greek text
//!
//! A document is segmented into paragraphs of tagged sentences, every body
//! sentence is scored on three factors (title-term overlap, term importance
//! and position), and the best sentences are emitted in their original order.
//!
//! # Architecture
//!
//! - [`text`]: case and diacritic folding, stop-words and suffix stemming
//! - [`segment`]: paragraph and sentence boundaries, title and subtitle detection
//! - [`scoring`]: per-sentence scores against a [`TermStatistics`] source
//! - [`select`]: compression-driven selection
//! - [`index`]: corpus term statistics, built before any document is scored
//!
//! # Example
//!
//! ```rust
//! use epitome_core::{IndexBuilder, Summarizer, SummarizerConfig};
//!
//! let config = SummarizerConfig::default();
//! let summarizer = Summarizer::from_config(&config).unwrap();
//!
//! let text = "ΤΙΤΛΟΣ\n\nΠρώτη πρόταση. Δεύτερη πρόταση με περισσότερες λέξεις εδώ.";
//!
//! // Index the whole corpus first
//! let mut builder = IndexBuilder::new(summarizer.normalizer().clone());
//! let id = builder.add_document("titlos.txt", text);
//! let index = builder.build();
//!
//! let summary = summarizer.summarize_document(text, id, &index);
//! assert_eq!(summary.len(), 1);
//! ```

pub mod config;
mod error;
pub mod index;
pub mod language;
pub mod scoring;
pub mod segment;
pub mod select;
mod summarizer;
pub mod text;

pub use config::{PositionMode, ScannerKind, SummarizerConfig, SummarizerConfigBuilder, TermMode};
pub use error::{Error, Result};
pub use index::{CorpusIndex, IndexBuilder};
pub use language::{get_language_resources, list_available_languages, LanguageResources};
pub use scoring::{DocumentId, ScoreBundle, ScoredDocument, Scorer, TermStatistics};
pub use segment::{Document, Paragraph, Segmenter, Sentence, SentenceKind};
pub use select::Selector;
pub use summarizer::{default_normalizer, Summarizer, Summary, SummarySentence};
pub use text::{AnalyzerStemmer, Normalizer, Stem, StemTag, Stemmer, StopwordStage, SuffixStemmer};
