//! Language resources
//!
//! Case-folding tables, punctuation denylists, sentence terminators,
//! stop-words and suffix rules, described in TOML and embedded at build time.

mod loader;
mod types;

pub use loader::{get_language_resources, list_available_languages};
pub use types::{
    LanguageResources, MetadataConfig, NormalizationConfig, SegmentationTables, StemmingConfig,
    StopwordConfig, SuffixRule,
};
