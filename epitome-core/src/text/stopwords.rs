use crate::language::LanguageResources;
use std::collections::HashSet;

/// Set of folded stop-words
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Create an empty set (no filtering)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from a list of already folded words
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        Self {
            words: words.iter().map(|w| w.as_ref().to_string()).collect(),
        }
    }

    pub fn from_resources(resources: &LanguageResources) -> Self {
        Self::from_list(&resources.stopwords.words)
    }

    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
