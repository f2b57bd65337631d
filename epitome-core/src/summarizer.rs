//! Single-document summarization pipeline

use crate::config::SummarizerConfig;
use crate::error::Result;
use crate::language::{get_language_resources, LanguageResources};
use crate::scoring::{DocumentId, ScoredDocument, Scorer, TermStatistics};
use crate::segment::{Document, Segmenter, SentenceKind};
use crate::select::Selector;
use crate::text::{Normalizer, SuffixStemmer};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One sentence of a summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySentence {
    pub text: String,
    pub position: usize,
    pub kind: SentenceKind,
    /// Composite score; absent for titles and subtitles
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composite: Option<f64>,
}

/// Selected sentences in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    sentences: Vec<SummarySentence>,
}

impl Summary {
    pub fn sentences(&self) -> &[SummarySentence] {
        &self.sentences
    }

    /// Sentence texts in order
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.sentences.iter().map(|s| s.text.as_str())
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// One sentence per line, each followed by a newline
    pub fn to_text(&self) -> String {
        self.lines().fold(String::new(), |mut out, line| {
            out.push_str(line);
            out.push('\n');
            out
        })
    }
}

/// Runs segmentation, scoring and selection for one document at a time
#[derive(Debug)]
pub struct Summarizer {
    segmenter: Segmenter,
    scorer: Scorer,
    selector: Selector,
}

impl Summarizer {
    /// Create a summarizer for the embedded resources of `config.text.language`
    pub fn new(config: &SummarizerConfig, normalizer: Normalizer) -> Result<Self> {
        let resources = get_language_resources(&config.text.language)?;
        Ok(Self::with_resources(config, resources, normalizer))
    }

    /// Create a summarizer with the rule-based stemmer of the configured language
    pub fn from_config(config: &SummarizerConfig) -> Result<Self> {
        let resources = get_language_resources(&config.text.language)?;
        let normalizer = default_normalizer(config, resources);
        Ok(Self::with_resources(config, resources, normalizer))
    }

    /// Create a summarizer over explicitly supplied language resources
    pub fn with_resources(
        config: &SummarizerConfig,
        resources: &LanguageResources,
        normalizer: Normalizer,
    ) -> Self {
        Self {
            segmenter: Segmenter::new(resources, &config.segmentation),
            scorer: Scorer::new(config, normalizer),
            selector: Selector::new(&config.selection),
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        self.scorer.normalizer()
    }

    pub fn segment(&self, raw_text: &str) -> Document {
        self.segmenter.segment(raw_text)
    }

    /// Segment and score a document without selecting
    pub fn score_document<S>(
        &self,
        raw_text: &str,
        document_id: DocumentId,
        stats: &S,
    ) -> ScoredDocument
    where
        S: TermStatistics + ?Sized,
    {
        self.scorer
            .score(self.segmenter.segment(raw_text), document_id, stats)
    }

    /// Summarize one document. Text without sentences yields an empty summary.
    pub fn summarize_document<S>(
        &self,
        raw_text: &str,
        document_id: DocumentId,
        stats: &S,
    ) -> Summary
    where
        S: TermStatistics + ?Sized,
    {
        let document = self.segmenter.segment(raw_text);
        if document.is_empty() {
            log::debug!("Document {document_id} has no sentences");
            return Summary::default();
        }

        let scored = self.scorer.score(document, document_id, stats);
        if log::log_enabled!(log::Level::Debug) {
            self.log_score_table(document_id, &scored);
        }

        let sentences = self
            .selector
            .select(&scored)
            .into_iter()
            .map(|sentence| SummarySentence {
                text: sentence.text().to_string(),
                position: sentence.position(),
                kind: sentence.kind(),
                composite: scored.score(sentence.position()).map(|s| s.composite()),
            })
            .collect();

        Summary { sentences }
    }

    /// Summarize documents in parallel, in input order
    #[cfg(feature = "parallel")]
    pub fn summarize_batch<S, T>(&self, documents: &[(DocumentId, T)], stats: &S) -> Vec<Summary>
    where
        S: TermStatistics + ?Sized,
        T: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        documents
            .par_iter()
            .map(|(id, text)| self.summarize_document(text.as_ref(), *id, stats))
            .collect()
    }

    fn log_score_table(&self, document_id: DocumentId, scored: &ScoredDocument) {
        log::debug!("Scores for document {document_id}:");
        log::debug!(
            "{:<8} {:>4} {:>4} {:>10} {:>10} {:>10} {:>10}",
            "kind",
            "para",
            "pos",
            "title",
            "terms",
            "position",
            "composite"
        );
        for (sentence, score) in scored.iter() {
            let marker = if self.selector.is_candidate(sentence) {
                ""
            } else {
                " (ignored)"
            };
            match score {
                Some(score) => log::debug!(
                    "{:<8} {:>4} {:>4} {:>10.4} {:>10.4} {:>10.4} {:>10.4}{}",
                    sentence.kind(),
                    sentence.paragraph_position(),
                    sentence.position(),
                    score.title_terms(),
                    score.term_importance(),
                    score.position(),
                    score.composite(),
                    marker
                ),
                None => log::debug!(
                    "{:<8} {:>4} {:>4} {}",
                    sentence.kind(),
                    sentence.paragraph_position(),
                    sentence.position(),
                    sentence.text()
                ),
            }
        }
    }
}

/// Normalizer with the rule-based stemmer and the configured stop-word stage
pub fn default_normalizer(config: &SummarizerConfig, resources: &LanguageResources) -> Normalizer {
    let stemmer = Arc::new(SuffixStemmer::from_resources(resources));
    Normalizer::new(resources, stemmer).with_stopword_stage(config.text.stopword_stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexBuilder;

    const SCENARIO: &str =
        "ΤΙΤΛΟΣ\n\nΠρώτη πρόταση. Δεύτερη πρόταση με περισσότερες λέξεις εδώ.";

    fn summarize(text: &str, config: &SummarizerConfig) -> Summary {
        let summarizer = Summarizer::from_config(config).unwrap();
        let mut builder = IndexBuilder::new(summarizer.normalizer().clone());
        let id = builder.add_document("doc", text);
        let index = builder.build();
        summarizer.summarize_document(text, id, &index)
    }

    #[test]
    fn test_single_candidate_is_returned() {
        let summary = summarize(SCENARIO, &SummarizerConfig::default());
        assert_eq!(
            summary.lines().collect::<Vec<_>>(),
            vec!["Δεύτερη πρόταση με περισσότερες λέξεις εδώ."]
        );
        assert_eq!(summary.sentences()[0].position, 2);
        assert!(summary.sentences()[0].composite.is_some());
    }

    #[test]
    fn test_show_titles() {
        let config = SummarizerConfig::builder().show_titles(true).build().unwrap();
        let summary = summarize(SCENARIO, &config);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary.sentences()[0].kind, SentenceKind::Title);
        assert_eq!(summary.sentences()[0].composite, None);
    }

    #[test]
    fn test_empty_text() {
        let summary = summarize("", &SummarizerConfig::default());
        assert!(summary.is_empty());
        assert_eq!(summary.to_text(), "");
    }

    #[test]
    fn test_text_rendering() {
        let summary = Summary {
            sentences: vec![
                SummarySentence {
                    text: "Μία.".into(),
                    position: 0,
                    kind: SentenceKind::Sentence,
                    composite: Some(1.0),
                },
                SummarySentence {
                    text: "Δύο.".into(),
                    position: 3,
                    kind: SentenceKind::Sentence,
                    composite: Some(0.5),
                },
            ],
        };
        assert_eq!(summary.to_text(), "Μία.\nΔύο.\n");
    }

    #[test]
    fn test_unsupported_language() {
        let config = SummarizerConfig::builder().language("xx").build().unwrap();
        assert!(Summarizer::from_config(&config).is_err());
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_batch_matches_sequential() {
        let config = SummarizerConfig::default();
        let summarizer = Summarizer::from_config(&config).unwrap();
        let texts = [
            SCENARIO.to_string(),
            "Η πόλη χτίστηκε πάνω σε λόφο κοντά στη θάλασσα. Οι κάτοικοι ήταν ψαράδες."
                .to_string(),
        ];

        let mut builder = IndexBuilder::new(summarizer.normalizer().clone());
        let documents: Vec<(DocumentId, &str)> = texts
            .iter()
            .enumerate()
            .map(|(i, t)| (builder.add_document(format!("{i}"), t), t.as_str()))
            .collect();
        let index = builder.build();

        let batch = summarizer.summarize_batch(&documents, &index);
        let sequential: Vec<_> = documents
            .iter()
            .map(|(id, t)| summarizer.summarize_document(t, *id, &index))
            .collect();
        assert_eq!(batch, sequential);
    }
}
