//! Normalization and stemming

mod normalizer;
mod stemmer;
mod stopwords;

pub use normalizer::{Normalized, Normalizer, StopwordStage};
pub use stemmer::{Analyzer, AnalyzerStemmer, Stem, StemTag, Stemmer, SuffixStemmer};
pub use stopwords::StopWords;
