use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Handle of a document registered with a term-statistics source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(usize);

impl DocumentId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Corpus-wide term statistics queried during scoring
///
/// Implementations must be fully populated before the first query; document
/// frequency is not meaningful over a partially indexed corpus.
pub trait TermStatistics: Send + Sync {
    /// Fraction of the document's term occurrences matching `stem`, in `[0, 1]`
    fn term_frequency(&self, stem: &str, document: DocumentId) -> f64;

    /// Number of documents containing `stem`
    fn document_frequency(&self, stem: &str) -> usize;

    fn total_documents(&self) -> usize;

    /// Number of term occurrences in the document
    fn total_term_count(&self, document: DocumentId) -> usize;

    /// `log10(N / (df + 1))`, or 0 for an empty corpus
    fn inverse_document_frequency(&self, stem: &str) -> f64 {
        let total = self.total_documents();
        if total == 0 {
            return 0.0;
        }
        (total as f64 / (self.document_frequency(stem) as f64 + 1.0)).log10()
    }
}

/// In-document sentence counts per stem
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermOccurrences {
    counts: HashMap<String, usize>,
    sentence_total: usize,
}

impl TermOccurrences {
    /// Count, for each stem, the sentences containing it at least once
    pub fn from_sentences<'a, I>(sentences: I) -> Self
    where
        I: IntoIterator<Item = &'a [String]>,
    {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut sentence_total = 0;

        for stems in sentences {
            sentence_total += 1;
            let distinct: HashSet<&String> = stems.iter().collect();
            for stem in distinct {
                *counts.entry(stem.clone()).or_insert(0) += 1;
            }
        }

        Self {
            counts,
            sentence_total,
        }
    }

    /// Sentences containing `stem`, floored to 1 for unseen stems
    pub fn occurrences(&self, stem: &str) -> usize {
        self.counts.get(stem).copied().unwrap_or(1)
    }

    pub fn sentence_total(&self) -> usize {
        self.sentence_total
    }

    /// Number of distinct stems seen
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `log10(total sentences / occurrences)`
    pub fn inverse_sentence_frequency(&self, stem: &str) -> f64 {
        if self.sentence_total == 0 {
            return 0.0;
        }
        (self.sentence_total as f64 / self.occurrences(stem) as f64).log10()
    }
}

/// Sum of `tf · idf` over the stems, counted with multiplicity
pub(crate) fn corpus_importance<S>(stems: &[String], stats: &S, document: DocumentId) -> f64
where
    S: TermStatistics + ?Sized,
{
    stems
        .iter()
        .map(|stem| stats.term_frequency(stem, document) * stats.inverse_document_frequency(stem))
        .sum()
}

/// Sum of `tf · isf` over the stems, counted with multiplicity
pub(crate) fn local_importance<S>(
    stems: &[String],
    stats: &S,
    document: DocumentId,
    occurrences: &TermOccurrences,
) -> f64
where
    S: TermStatistics + ?Sized,
{
    stems
        .iter()
        .map(|stem| {
            stats.term_frequency(stem, document) * occurrences.inverse_sentence_frequency(stem)
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedStatistics;

    impl TermStatistics for FixedStatistics {
        fn term_frequency(&self, stem: &str, _document: DocumentId) -> f64 {
            match stem {
                "νομ" => 0.5,
                "κρατ" => 0.25,
                _ => 0.0,
            }
        }

        fn document_frequency(&self, stem: &str) -> usize {
            if stem == "νομ" {
                9
            } else {
                0
            }
        }

        fn total_documents(&self) -> usize {
            100
        }

        fn total_term_count(&self, _document: DocumentId) -> usize {
            4
        }
    }

    struct EmptyCorpus;

    impl TermStatistics for EmptyCorpus {
        fn term_frequency(&self, _stem: &str, _document: DocumentId) -> f64 {
            0.0
        }
        fn document_frequency(&self, _stem: &str) -> usize {
            0
        }
        fn total_documents(&self) -> usize {
            0
        }
        fn total_term_count(&self, _document: DocumentId) -> usize {
            0
        }
    }

    fn stems(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_inverse_document_frequency() {
        assert!((FixedStatistics.inverse_document_frequency("νομ") - 1.0).abs() < 1e-12);
        assert!((FixedStatistics.inverse_document_frequency("κρατ") - 2.0).abs() < 1e-12);
        assert_eq!(EmptyCorpus.inverse_document_frequency("νομ"), 0.0);
    }

    #[test]
    fn test_occurrence_map_counts_sentences() {
        let mut sentences: Vec<Vec<String>> = (0..10).map(|_| stems(&["αλλ"])).collect();
        sentences[1] = stems(&["νομοσ", "νομοσ"]);
        sentences[4] = stems(&["νομοσ"]);
        sentences[7] = stems(&["αλλ", "νομοσ"]);

        let occurrences = TermOccurrences::from_sentences(sentences.iter().map(Vec::as_slice));
        assert_eq!(occurrences.occurrences("νομοσ"), 3);
        assert_eq!(occurrences.occurrences("αλλ"), 8);
        assert_eq!(occurrences.occurrences("αγνωστ"), 1);
        assert_eq!(occurrences.sentence_total(), 10);
        assert_eq!(occurrences.len(), 2);
    }

    #[test]
    fn test_inverse_sentence_frequency() {
        let sentences = [stems(&["α"]), stems(&["β"]), stems(&["α", "β"]), stems(&["γ"])];
        let occurrences = TermOccurrences::from_sentences(sentences.iter().map(Vec::as_slice));
        assert!((occurrences.inverse_sentence_frequency("α") - 2f64.log10()).abs() < 1e-12);
        assert!((occurrences.inverse_sentence_frequency("δ") - 4f64.log10()).abs() < 1e-12);
        assert_eq!(
            TermOccurrences::default().inverse_sentence_frequency("α"),
            0.0
        );
    }

    #[test]
    fn test_importance_counts_multiplicity() {
        let id = DocumentId::new(0);
        let once = corpus_importance(&stems(&["νομ"]), &FixedStatistics, id);
        let twice = corpus_importance(&stems(&["νομ", "νομ"]), &FixedStatistics, id);
        assert!((once - 0.5).abs() < 1e-12);
        assert!((twice - 1.0).abs() < 1e-12);

        let sentences = [stems(&["νομ"]), stems(&["κρατ"])];
        let occurrences = TermOccurrences::from_sentences(sentences.iter().map(Vec::as_slice));
        let local = local_importance(&stems(&["νομ", "κρατ"]), &FixedStatistics, id, &occurrences);
        assert!((local - 0.75 * 2f64.log10()).abs() < 1e-12);
    }
}
