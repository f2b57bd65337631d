//! Suffix-stripping stemmers
//!
//! Every stemming call returns an explicit [`StemTag`] next to the (possibly
//! shortened) text. The returned text is always a prefix of the input token.

use super::stopwords::StopWords;
use crate::language::{LanguageResources, SuffixRule};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::sync::Arc;

/// Classification of a stemmed token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StemTag {
    /// Ordinary word, possibly shortened
    Regular,
    /// Shorter than the minimum word length, returned unchanged
    ShortWord,
    /// Member of the stemmer's stop-word list, returned unchanged
    StopWord,
    /// Contains control characters, returned unchanged
    Malformed,
}

/// Result of stemming a single token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stem {
    pub text: String,
    pub tag: StemTag,
}

impl Stem {
    pub fn new(text: impl Into<String>, tag: StemTag) -> Self {
        Self {
            text: text.into(),
            tag,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the stem takes part in scoring comparisons
    pub fn is_comparable(&self) -> bool {
        matches!(self.tag, StemTag::Regular | StemTag::Malformed)
    }
}

/// Capability interface for reducing a normalized token to its stem
pub trait Stemmer: Send + Sync {
    /// Stem a single normalized token
    fn stem(&self, token: &str) -> Stem;
}

fn is_malformed(token: &str) -> bool {
    token.chars().any(char::is_control)
}

/// Rule-based stemmer driven by an ordered suffix table
#[derive(Debug, Clone)]
pub struct SuffixStemmer {
    /// Rules sorted by suffix length, longest first
    rules: Vec<SuffixRule>,
    min_word_length: usize,
    stopwords: Option<Arc<StopWords>>,
}

impl SuffixStemmer {
    /// Create a stemmer from an arbitrary rule table
    pub fn new(mut rules: Vec<SuffixRule>, min_word_length: usize) -> Self {
        rules.sort_by_key(|rule| Reverse(rule.suffix.chars().count()));
        Self {
            rules,
            min_word_length,
            stopwords: None,
        }
    }

    /// Create a stemmer from language resources
    pub fn from_resources(resources: &LanguageResources) -> Self {
        Self::new(
            resources.stemming.rules.clone(),
            resources.stemming.min_word_length,
        )
    }

    /// Tag members of `stopwords` as [`StemTag::StopWord`]
    pub fn with_stopwords(mut self, stopwords: Arc<StopWords>) -> Self {
        self.stopwords = Some(stopwords);
        self
    }

    pub fn min_word_length(&self) -> usize {
        self.min_word_length
    }

    pub fn rules(&self) -> &[SuffixRule] {
        &self.rules
    }

    /// Apply the longest matching rule that leaves a long enough stem
    fn strip_once(&self, word: &str) -> Option<String> {
        self.rules.iter().find_map(|rule| {
            let base = word.strip_suffix(rule.suffix.as_str())?;
            if base.chars().count() >= rule.min_stem {
                Some(format!("{base}{}", rule.replacement))
            } else {
                None
            }
        })
    }
}

impl Stemmer for SuffixStemmer {
    fn stem(&self, token: &str) -> Stem {
        if is_malformed(token) {
            return Stem::new(token, StemTag::Malformed);
        }

        if self
            .stopwords
            .as_ref()
            .is_some_and(|stopwords| stopwords.contains(token))
        {
            return Stem::new(token, StemTag::StopWord);
        }

        if token.chars().count() < self.min_word_length {
            return Stem::new(token, StemTag::ShortWord);
        }

        // Strip until no rule applies, so a Regular stem is a fixpoint.
        let mut current = token.to_string();
        while current.chars().count() >= self.min_word_length {
            match self.strip_once(&current) {
                Some(next) => current = next,
                None => break,
            }
        }

        Stem::new(current, StemTag::Regular)
    }
}

/// External morphological analyzer
///
/// Returns the stem of `token`, or `None` when the analyzer has no answer.
pub trait Analyzer: Send + Sync {
    fn analyze(&self, token: &str) -> Option<String>;
}

impl<F> Analyzer for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn analyze(&self, token: &str) -> Option<String> {
        self(token)
    }
}

/// Stemmer that delegates to an external [`Analyzer`]
///
/// The short-word and malformed-token policy is the same as for
/// [`SuffixStemmer`]. Analyzer answers that are empty or not a prefix of the
/// token are discarded.
#[derive(Debug, Clone)]
pub struct AnalyzerStemmer<A> {
    analyzer: A,
    min_word_length: usize,
}

impl<A: Analyzer> AnalyzerStemmer<A> {
    pub fn new(analyzer: A, min_word_length: usize) -> Self {
        Self {
            analyzer,
            min_word_length,
        }
    }
}

impl<A: Analyzer> Stemmer for AnalyzerStemmer<A> {
    fn stem(&self, token: &str) -> Stem {
        if is_malformed(token) {
            return Stem::new(token, StemTag::Malformed);
        }

        if token.chars().count() < self.min_word_length {
            return Stem::new(token, StemTag::ShortWord);
        }

        match self.analyzer.analyze(token) {
            Some(stem) if !stem.is_empty() && token.starts_with(stem.as_str()) => {
                Stem::new(stem, StemTag::Regular)
            }
            Some(stem) => {
                log::trace!("discarding analyzer stem '{stem}' for '{token}'");
                Stem::new(token, StemTag::Regular)
            }
            None => Stem::new(token, StemTag::Regular),
        }
    }
}
