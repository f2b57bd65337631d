use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Language-specific tables consumed by the normalizer, stemmer and segmenter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageResources {
    pub metadata: MetadataConfig,
    pub normalization: NormalizationConfig,
    pub segmentation: SegmentationTables,
    pub stopwords: StopwordConfig,
    pub stemming: StemmingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizationConfig {
    /// Accented vowel to bare vowel substitutions, applied after case folding
    pub diacritics: Vec<(char, char)>,
    /// Terminal letter variant folded to its medial form
    pub terminal_fold: (char, char),
    /// Punctuation and symbols replaced by whitespace
    pub denylist: Vec<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentationTables {
    pub terminators: Vec<char>,
    /// Closing quotes and brackets that may trail a terminator
    #[serde(default)]
    pub closing: Vec<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopwordConfig {
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StemmingConfig {
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,
    pub rules: Vec<SuffixRule>,
}

/// A single suffix-stripping rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(default = "default_min_stem")]
    pub min_stem: usize,
}

fn default_min_word_length() -> usize {
    4
}

fn default_min_stem() -> usize {
    2
}

impl LanguageResources {
    /// Parse resources from a TOML document and validate them
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let resources: LanguageResources = toml::from_str(content)
            .map_err(|e| Error::Configuration(format!("Failed to parse language TOML: {e}")))?;
        resources.validate()?;
        Ok(resources)
    }

    /// Load resources from an external file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let resources: LanguageResources = toml::from_str(&content).map_err(|e| {
            Error::Configuration(format!(
                "Failed to parse TOML from '{}': {}",
                path.display(),
                e
            ))
        })?;
        resources.validate()?;
        Ok(resources)
    }

    /// Check the invariants the text pipeline relies on
    pub fn validate(&self) -> Result<()> {
        if self.metadata.code.trim().is_empty() {
            return Err(Error::InvalidLanguageResources(
                "metadata.code must not be empty".into(),
            ));
        }

        if self.segmentation.terminators.is_empty() {
            return Err(Error::InvalidLanguageResources(
                "segmentation.terminators must not be empty".into(),
            ));
        }

        if self.stemming.min_word_length == 0 {
            return Err(Error::InvalidLanguageResources(
                "stemming.min_word_length must be at least 1".into(),
            ));
        }

        for rule in &self.stemming.rules {
            if rule.suffix.is_empty() {
                return Err(Error::InvalidLanguageResources(
                    "stemming rule with empty suffix".into(),
                ));
            }
            // The stem must stay a prefix of the input word.
            if !rule.suffix.starts_with(&rule.replacement) || rule.replacement == rule.suffix {
                return Err(Error::InvalidLanguageResources(format!(
                    "stemming rule '{}' -> '{}' does not shorten the word",
                    rule.suffix, rule.replacement
                )));
            }
        }

        Ok(())
    }
}
