//! Summarizer configuration
//!
//! One explicit value constructed at startup (from a TOML file or the
//! builder) and passed into every component. Validation happens once, when
//! the value is built; components assume a validated configuration.

use crate::error::{Error, Result};
use crate::text::StopwordStage;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration constants
pub mod defaults {
    pub const TITLE_WEIGHT: f64 = 0.35;
    pub const TERM_WEIGHT: f64 = 0.45;
    pub const POSITION_WEIGHT: f64 = 0.20;

    /// Coefficient of the primary-title overlap term
    pub const PRIMARY_TITLE_COEFFICIENT: f64 = 0.6;
    /// Coefficient of the subtitle overlap term
    pub const SECONDARY_TITLE_COEFFICIENT: f64 = 0.4;

    /// Share of its term-importance score added to a paragraph opener
    pub const OPENER_BOOST: f64 = 0.85;

    pub const MIN_WORDS: usize = 3;
    /// Percentage of candidate sentences to discard
    pub const COMPRESSION: u32 = 50;
    pub const MIN_SENTENCES: usize = 3;

    pub const ABBREVIATION_SPAN: usize = 4;
    pub const SUBTITLE_MAX_WORDS: usize = 9;
    pub const TITLE_MAX_WORDS: usize = 7;

    pub const LANGUAGE: &str = "el";
}

/// How term importance is computed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TermMode {
    /// Term frequency times corpus inverse document frequency
    #[default]
    Corpus,
    /// Term frequency times in-document inverse sentence frequency
    Local,
}

/// How sentence location contributes to the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionMode {
    /// Boost the term importance of each paragraph's first sentence
    ParagraphOpener,
    /// Reward sentences near the start of the document and their paragraph
    #[default]
    NormalizedPosition,
}

/// Sentence-boundary scanner used by the segmenter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScannerKind {
    /// Language terminator characters
    #[default]
    Terminator,
    /// Unicode UAX #29 sentence boundaries
    Unicode,
}

/// Coefficients of the composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct WeightsConfig {
    pub title: f64,
    pub terms: f64,
    pub position: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            title: defaults::TITLE_WEIGHT,
            terms: defaults::TERM_WEIGHT,
            position: defaults::POSITION_WEIGHT,
        }
    }
}

/// Coefficients of the title-term score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TitleConfig {
    pub primary: f64,
    pub secondary: f64,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            primary: defaults::PRIMARY_TITLE_COEFFICIENT,
            secondary: defaults::SECONDARY_TITLE_COEFFICIENT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScoringConfig {
    pub term_mode: TermMode,
    pub position_mode: PositionMode,
    pub opener_boost: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            term_mode: TermMode::default(),
            position_mode: PositionMode::default(),
            opener_boost: defaults::OPENER_BOOST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectionConfig {
    /// Sentences with this many words or fewer are never selected
    pub min_words: usize,
    /// Percentage (0-100) of candidate sentences to discard
    pub compression: u32,
    pub min_sentences: usize,
    /// Re-insert titles and subtitles into the summary
    pub show_titles: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            min_words: defaults::MIN_WORDS,
            compression: defaults::COMPRESSION,
            min_sentences: defaults::MIN_SENTENCES,
            show_titles: false,
        }
    }
}

impl SelectionConfig {
    /// Compression as a fraction in `[0, 1]`
    pub fn compression_ratio(&self) -> f64 {
        f64::from(self.compression) / 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SegmentationConfig {
    /// Longest span before a '.' still treated as an abbreviation
    pub abbreviation_span: usize,
    pub subtitle_max_words: usize,
    /// Word limit when the first subtitle-shaped paragraph becomes the title
    pub title_max_words: usize,
    pub scanner: ScannerKind,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            abbreviation_span: defaults::ABBREVIATION_SPAN,
            subtitle_max_words: defaults::SUBTITLE_MAX_WORDS,
            title_max_words: defaults::TITLE_MAX_WORDS,
            scanner: ScannerKind::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TextConfig {
    pub language: String,
    pub stopword_stage: StopwordStage,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            language: defaults::LANGUAGE.to_string(),
            stopword_stage: StopwordStage::default(),
        }
    }
}

/// Complete summarizer configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SummarizerConfig {
    pub weights: WeightsConfig,
    pub title: TitleConfig,
    pub scoring: ScoringConfig,
    pub selection: SelectionConfig,
    pub segmentation: SegmentationConfig,
    pub text: TextConfig,
}

fn require_finite(option: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(Error::invalid_option(option, format!("{value} is not a finite number")))
    }
}

/// Dotted key (`section.key`) of the `key = value` line containing `offset`
fn key_at(content: &str, offset: usize) -> Option<String> {
    let before = content.get(..offset)?;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let (key, _) = before[line_start..].split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }

    let section = before[..line_start]
        .lines()
        .map(str::trim)
        .filter(|line| line.starts_with('[') && line.ends_with(']'))
        .last()
        .map(|header| header.trim_matches(|c| c == '[' || c == ']').trim());

    Some(match section {
        Some(section) if !section.is_empty() => format!("{section}.{key}"),
        _ => key.to_string(),
    })
}

/// Render a TOML error, naming the offending option when one can be located
pub fn describe_toml_error(content: &str, error: &toml::de::Error) -> String {
    let key = error
        .span()
        .and_then(|span| key_at(content, span.start));
    match key {
        Some(key) => format!(
            "invalid value for option '{key}': {}",
            error.message().trim()
        ),
        None => error.to_string(),
    }
}

impl SummarizerConfig {
    /// Create a configuration builder
    pub fn builder() -> SummarizerConfigBuilder {
        SummarizerConfigBuilder::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SummarizerConfig = toml::from_str(content).map_err(|e| {
            Error::Configuration(format!(
                "Failed to parse configuration: {}",
                describe_toml_error(content, &e)
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config: SummarizerConfig = toml::from_str(&content).map_err(|e| {
            Error::Configuration(format!(
                "Failed to parse TOML from '{}': {}",
                path.display(),
                describe_toml_error(&content, &e)
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Configuration(format!("Failed to serialize configuration: {e}")))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        require_finite("weights.title", self.weights.title)?;
        require_finite("weights.terms", self.weights.terms)?;
        require_finite("weights.position", self.weights.position)?;
        require_finite("title.primary", self.title.primary)?;
        require_finite("title.secondary", self.title.secondary)?;
        require_finite("scoring.opener-boost", self.scoring.opener_boost)?;

        if self.scoring.opener_boost < 0.0 {
            return Err(Error::invalid_option(
                "scoring.opener-boost",
                "must not be negative",
            ));
        }

        if self.selection.compression > 100 {
            return Err(Error::invalid_option(
                "selection.compression",
                format!("{} is outside 0..=100", self.selection.compression),
            ));
        }

        if self.segmentation.subtitle_max_words == 0 {
            return Err(Error::invalid_option(
                "segmentation.subtitle-max-words",
                "must be greater than 0",
            ));
        }

        if self.segmentation.title_max_words == 0 {
            return Err(Error::invalid_option(
                "segmentation.title-max-words",
                "must be greater than 0",
            ));
        }

        if self.text.language.trim().is_empty() {
            return Err(Error::invalid_option("text.language", "must not be empty"));
        }

        Ok(())
    }
}

/// Fluent builder for [`SummarizerConfig`]
#[derive(Debug, Default)]
pub struct SummarizerConfigBuilder {
    config: SummarizerConfig,
}

impl SummarizerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the composite score coefficients
    pub fn weights(mut self, title: f64, terms: f64, position: f64) -> Self {
        self.config.weights = WeightsConfig {
            title,
            terms,
            position,
        };
        self
    }

    /// Set the primary and secondary title coefficients
    pub fn title_coefficients(mut self, primary: f64, secondary: f64) -> Self {
        self.config.title = TitleConfig { primary, secondary };
        self
    }

    pub fn term_mode(mut self, mode: TermMode) -> Self {
        self.config.scoring.term_mode = mode;
        self
    }

    pub fn position_mode(mut self, mode: PositionMode) -> Self {
        self.config.scoring.position_mode = mode;
        self
    }

    pub fn opener_boost(mut self, boost: f64) -> Self {
        self.config.scoring.opener_boost = boost;
        self
    }

    pub fn min_words(mut self, words: usize) -> Self {
        self.config.selection.min_words = words;
        self
    }

    /// Set the compression percentage (0-100)
    pub fn compression(mut self, percent: u32) -> Self {
        self.config.selection.compression = percent;
        self
    }

    pub fn min_sentences(mut self, count: usize) -> Self {
        self.config.selection.min_sentences = count;
        self
    }

    pub fn show_titles(mut self, show: bool) -> Self {
        self.config.selection.show_titles = show;
        self
    }

    pub fn scanner(mut self, scanner: ScannerKind) -> Self {
        self.config.segmentation.scanner = scanner;
        self
    }

    pub fn abbreviation_span(mut self, span: usize) -> Self {
        self.config.segmentation.abbreviation_span = span;
        self
    }

    pub fn language(mut self, code: impl Into<String>) -> Self {
        self.config.text.language = code.into();
        self
    }

    pub fn stopword_stage(mut self, stage: StopwordStage) -> Self {
        self.config.text.stopword_stage = stage;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<SummarizerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
