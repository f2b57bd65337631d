//! Token normalization
//!
//! Folding runs in a fixed order: case folding, diacritic stripping, terminal
//! letter folding, punctuation removal and whitespace collapse. Surviving
//! tokens are checked against the stop-word set and handed to the stemmer.

use super::stemmer::{Stem, StemTag, Stemmer, SuffixStemmer};
use super::stopwords::StopWords;
use crate::error::Result;
use crate::language::{get_language_resources, LanguageResources};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// When stop-words are removed relative to stemming
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopwordStage {
    /// Compare the folded token against the stop-word set
    #[default]
    BeforeStemming,
    /// Compare the stem against the stop-word set
    AfterStemming,
}

/// Outcome of normalizing one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// The word is a stop-word and takes no part in scoring
    Excluded,
    /// The word's stem, which may be empty
    Stem(Stem),
}

impl Normalized {
    pub fn stem(&self) -> Option<&Stem> {
        match self {
            Normalized::Excluded => None,
            Normalized::Stem(stem) => Some(stem),
        }
    }
}

/// Folds and stems words using one language's tables
#[derive(Clone)]
pub struct Normalizer {
    diacritics: HashMap<char, char>,
    terminal_fold: (char, char),
    denylist: HashSet<char>,
    stopwords: Arc<StopWords>,
    stage: StopwordStage,
    stemmer: Arc<dyn Stemmer>,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("diacritics", &self.diacritics.len())
            .field("denylist", &self.denylist.len())
            .field("stopwords", &self.stopwords.len())
            .field("stage", &self.stage)
            .finish()
    }
}

impl Normalizer {
    /// Create a normalizer from language resources and an injected stemmer
    pub fn new(resources: &LanguageResources, stemmer: Arc<dyn Stemmer>) -> Self {
        let normalization = &resources.normalization;
        Self {
            diacritics: normalization.diacritics.iter().copied().collect(),
            terminal_fold: normalization.terminal_fold,
            denylist: normalization.denylist.iter().copied().collect(),
            stopwords: Arc::new(StopWords::from_resources(resources)),
            stage: StopwordStage::default(),
            stemmer,
        }
    }

    /// Normalizer for an embedded language using the rule-based stemmer
    pub fn for_language(code: &str) -> Result<Self> {
        let resources = get_language_resources(code)?;
        Ok(Self::with_suffix_stemmer(resources))
    }

    /// Normalizer using the rule-based stemmer built from the same resources
    pub fn with_suffix_stemmer(resources: &LanguageResources) -> Self {
        Self::new(resources, Arc::new(SuffixStemmer::from_resources(resources)))
    }

    pub fn with_stopword_stage(mut self, stage: StopwordStage) -> Self {
        self.stage = stage;
        self
    }

    pub fn stopword_stage(&self) -> StopwordStage {
        self.stage
    }

    pub fn stopwords(&self) -> &StopWords {
        &self.stopwords
    }

    /// Apply the folding steps without stop-word removal or stemming
    pub fn fold(&self, text: &str) -> String {
        let (terminal, medial) = self.terminal_fold;
        let folded: String = text
            .to_lowercase()
            .chars()
            .map(|c| *self.diacritics.get(&c).unwrap_or(&c))
            .map(|c| if c == terminal { medial } else { c })
            .map(|c| if self.denylist.contains(&c) { ' ' } else { c })
            .collect();

        folded.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Normalize a single word
    pub fn normalize(&self, word: &str) -> Normalized {
        self.normalize_folded(&self.fold(word))
    }

    fn normalize_folded(&self, token: &str) -> Normalized {
        if self.stage == StopwordStage::BeforeStemming && self.stopwords.contains(token) {
            return Normalized::Excluded;
        }

        let stem = self.stemmer.stem(token);
        if stem.tag == StemTag::StopWord {
            return Normalized::Excluded;
        }
        if self.stage == StopwordStage::AfterStemming && self.stopwords.contains(&stem.text) {
            return Normalized::Excluded;
        }

        Normalized::Stem(stem)
    }

    /// Stems of every non-excluded token of a sentence, in order
    pub fn stems(&self, sentence: &str) -> Vec<Stem> {
        self.fold(sentence)
            .split(' ')
            .filter(|token| !token.is_empty())
            .filter_map(|token| match self.normalize_folded(token) {
                Normalized::Excluded => None,
                Normalized::Stem(stem) => Some(stem),
            })
            .collect()
    }

    /// Texts of the stems that take part in scoring, in order
    pub fn comparable_stems(&self, sentence: &str) -> Vec<String> {
        self.stems(sentence)
            .into_iter()
            .filter(Stem::is_comparable)
            .map(|stem| stem.text)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greek() -> Normalizer {
        Normalizer::for_language("el").unwrap()
    }

    #[test]
    fn test_fold_strips_tonation_and_case() {
        let normalizer = greek();
        assert_eq!(normalizer.fold("Αγάπη"), "αγαπη");
        assert_eq!(normalizer.fold("ΐ ΰ ϊ ϋ"), "ι υ ι υ");
    }

    #[test]
    fn test_fold_replaces_final_sigma() {
        let normalizer = greek();
        assert_eq!(normalizer.fold("νόμος"), "νομοσ");
        assert_eq!(normalizer.fold("ΝΟΜΟΣ"), "νομοσ");
    }

    #[test]
    fn test_fold_removes_punctuation_and_collapses_whitespace() {
        let normalizer = greek();
        assert_eq!(
            normalizer.fold("  «Καλημέρα»,\n\tκόσμε!  "),
            "καλημερα κοσμε"
        );
        assert_eq!(normalizer.fold("πέντε-έξι"), "πεντε εξι");
    }

    #[test]
    fn test_tonation_insensitive_stems() {
        let normalizer = greek();
        assert_eq!(normalizer.normalize("αγάπη"), normalizer.normalize("αγαπη"));
        assert_eq!(
            normalizer.normalize("αγάπη").stem().map(Stem::as_str),
            Some("αγαπ")
        );
    }

    #[test]
    fn test_stopword_is_excluded_not_empty() {
        let normalizer = greek();
        assert_eq!(normalizer.normalize("Και"), Normalized::Excluded);
        assert_eq!(normalizer.normalize("τους"), Normalized::Excluded);

        match normalizer.normalize("!!!") {
            Normalized::Stem(stem) => assert_eq!(stem.text, ""),
            Normalized::Excluded => panic!("punctuation-only word is not a stop-word"),
        }
    }

    #[test]
    fn test_stems_of_sentence() {
        let normalizer = greek();
        let stems = normalizer.comparable_stems("Ο πόλεμος του Πελοποννήσου.");
        assert_eq!(stems, vec!["πολεμ", "πελοπονν"]);
    }

    #[test]
    fn test_short_words_are_kept_but_not_comparable() {
        let normalizer = greek();
        let stems = normalizer.stems("ένα νέο σπίτι");
        assert_eq!(stems.len(), 3);
        assert_eq!(stems[0].tag, StemTag::ShortWord);
        assert_eq!(stems[1].tag, StemTag::ShortWord);
        assert_eq!(stems[2].tag, StemTag::Regular);
    }

    #[test]
    fn test_after_stemming_stage() {
        let resources = get_language_resources("el").unwrap();
        // "αλλα" is a stop-word, its stem "αλλ" is not.
        let before = Normalizer::with_suffix_stemmer(resources);
        let after = Normalizer::with_suffix_stemmer(resources)
            .with_stopword_stage(StopwordStage::AfterStemming);

        assert_eq!(before.normalize("άλλα"), Normalized::Excluded);
        assert_ne!(after.normalize("άλλα"), Normalized::Excluded);
        assert_eq!(after.stopword_stage(), StopwordStage::AfterStemming);
    }

    #[test]
    fn test_injected_stemmer_is_used() {
        let resources = get_language_resources("el").unwrap();
        let stemmer = crate::text::AnalyzerStemmer::new(
            |token: &str| -> Option<String> { Some(token.chars().take(4).collect()) },
            4,
        );
        let normalizer = Normalizer::new(resources, Arc::new(stemmer));
        assert_eq!(normalizer.comparable_stems("θάλασσα"), vec!["θαλα"]);
    }
}
