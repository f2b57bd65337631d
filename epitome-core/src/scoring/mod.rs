//! Sentence scoring
//!
//! Every body sentence receives a title-term score, a term-importance score
//! and a positional score, combined into one composite weight. Scores are
//! produced as a separate [`ScoredDocument`] so a sentence is never observed
//! half-scored.

mod position;
mod terms;
mod title;

pub use position::normalized_position;
pub use terms::{DocumentId, TermOccurrences, TermStatistics};
pub use title::TitleDictionary;

use crate::config::{
    PositionMode, ScoringConfig, SummarizerConfig, TermMode, TitleConfig, WeightsConfig,
};
use crate::segment::{Document, Sentence, SentenceKind};
use crate::text::Normalizer;
use serde::Serialize;

/// Weighted sum of the three partial scores
pub fn composite(
    weights: &WeightsConfig,
    title_terms: f64,
    term_importance: f64,
    position: f64,
) -> f64 {
    weights.title * title_terms + weights.terms * term_importance + weights.position * position
}

/// The scores of one body sentence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBundle {
    title_terms: f64,
    term_importance: f64,
    position: f64,
    composite: f64,
}

impl ScoreBundle {
    pub fn new(
        weights: &WeightsConfig,
        title_terms: f64,
        term_importance: f64,
        position: f64,
    ) -> Self {
        Self {
            title_terms,
            term_importance,
            position,
            composite: composite(weights, title_terms, term_importance, position),
        }
    }

    pub fn title_terms(&self) -> f64 {
        self.title_terms
    }

    pub fn term_importance(&self) -> f64 {
        self.term_importance
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn composite(&self) -> f64 {
        self.composite
    }
}

/// A document together with the scores of its sentences
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    document: Document,
    /// Indexed by sentence position; headings carry `None`
    scores: Vec<Option<ScoreBundle>>,
}

impl ScoredDocument {
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn score(&self, position: usize) -> Option<&ScoreBundle> {
        self.scores.get(position).and_then(Option::as_ref)
    }

    /// Sentences paired with their scores, in reading order
    pub fn iter(&self) -> impl Iterator<Item = (&Sentence, Option<&ScoreBundle>)> + '_ {
        self.document
            .sentences()
            .zip(self.scores.iter().map(Option::as_ref))
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Computes sentence scores for one document at a time
#[derive(Debug, Clone)]
pub struct Scorer {
    normalizer: Normalizer,
    weights: WeightsConfig,
    title: TitleConfig,
    scoring: ScoringConfig,
}

impl Scorer {
    pub fn new(config: &SummarizerConfig, normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            weights: config.weights,
            title: config.title,
            scoring: config.scoring,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Build the title dictionary of a document
    pub fn title_dictionary(&self, document: &Document) -> TitleDictionary {
        let stems_of = |kind: SentenceKind| {
            document
                .sentences()
                .filter(move |s| s.kind() == kind)
                .flat_map(|s| self.normalizer.comparable_stems(s.text()))
                .collect::<Vec<_>>()
        };
        TitleDictionary::new(stems_of(SentenceKind::Title), stems_of(SentenceKind::Subtitle))
    }

    /// Score every body sentence of `document`
    pub fn score<S>(
        &self,
        document: Document,
        document_id: DocumentId,
        stats: &S,
    ) -> ScoredDocument
    where
        S: TermStatistics + ?Sized,
    {
        let stems: Vec<Vec<String>> = document
            .sentences()
            .map(|s| self.normalizer.comparable_stems(s.text()))
            .collect();
        let dictionary = self.title_dictionary(&document);
        log::trace!(
            "Title dictionary: {} title stems, {} subtitle stems",
            dictionary.title_stems().len(),
            dictionary.subtitle_stems().len()
        );

        let occurrences = match self.scoring.term_mode {
            TermMode::Local => Some(TermOccurrences::from_sentences(
                document
                    .sentences()
                    .filter(|s| s.kind() == SentenceKind::Sentence)
                    .map(|s| stems[s.position()].as_slice()),
            )),
            TermMode::Corpus => None,
        };

        let paragraph_count = document.paragraph_count();
        let mut scores = Vec::with_capacity(document.sentence_count());

        for paragraph in document.paragraphs() {
            for sentence in paragraph.sentences() {
                if sentence.kind().is_heading() {
                    scores.push(None);
                    continue;
                }

                let sentence_stems = &stems[sentence.position()];
                let title_terms = dictionary.score(sentence_stems, &self.title);
                let mut term_importance = match &occurrences {
                    Some(occurrences) => {
                        terms::local_importance(sentence_stems, stats, document_id, occurrences)
                    }
                    None => terms::corpus_importance(sentence_stems, stats, document_id),
                };

                let position = match self.scoring.position_mode {
                    PositionMode::ParagraphOpener => {
                        if sentence.paragraph_position() == 0 {
                            term_importance *= 1.0 + self.scoring.opener_boost;
                        }
                        0.0
                    }
                    PositionMode::NormalizedPosition => normalized_position(
                        paragraph.position(),
                        paragraph_count,
                        sentence.paragraph_position(),
                        paragraph.len(),
                    ),
                };

                scores.push(Some(ScoreBundle::new(
                    &self.weights,
                    title_terms,
                    term_importance,
                    position,
                )));
            }
        }

        ScoredDocument { document, scores }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Every stem has the same term frequency in every document
    struct UniformStatistics {
        tf: f64,
        idf: HashMap<&'static str, usize>,
    }

    impl TermStatistics for UniformStatistics {
        fn term_frequency(&self, _stem: &str, _document: DocumentId) -> f64 {
            self.tf
        }
        fn document_frequency(&self, stem: &str) -> usize {
            self.idf.get(stem).copied().unwrap_or(0)
        }
        fn total_documents(&self) -> usize {
            10
        }
        fn total_term_count(&self, _document: DocumentId) -> usize {
            1
        }
    }

    fn stats() -> UniformStatistics {
        UniformStatistics {
            tf: 0.1,
            idf: HashMap::new(),
        }
    }

    fn part(items: &[(&str, SentenceKind)]) -> Vec<(String, SentenceKind)> {
        items.iter().map(|(t, k)| (t.to_string(), *k)).collect()
    }

    fn document() -> Document {
        Document::from_parts(vec![
            part(&[("Ο πόλεμος", SentenceKind::Title)]),
            part(&[
                ("Ο πόλεμος ξεκίνησε νωρίς.", SentenceKind::Sentence),
                ("Οι Αθηναίοι έχασαν.", SentenceKind::Sentence),
            ]),
            part(&[("Η ειρήνη ήρθε αργότερα.", SentenceKind::Sentence)]),
        ])
    }

    fn scorer(config: &SummarizerConfig) -> Scorer {
        Scorer::new(config, Normalizer::for_language("el").unwrap())
    }

    fn score_with(config: &SummarizerConfig) -> ScoredDocument {
        scorer(config).score(document(), DocumentId::new(0), &stats())
    }

    #[test]
    fn test_composite_is_weighted_sum() {
        let weights = WeightsConfig {
            title: 1.0,
            terms: 2.0,
            position: 3.0,
        };
        assert_eq!(composite(&weights, 1.0, 1.0, 1.0), 6.0);
        assert_eq!(ScoreBundle::new(&weights, 0.5, 0.25, 0.0).composite(), 1.0);
    }

    #[test]
    fn test_headings_are_not_scored() {
        let scored = score_with(&SummarizerConfig::default());
        assert!(scored.score(0).is_none());
        assert!(scored.score(1).is_some());
        assert_eq!(scored.iter().count(), 4);
    }

    #[test]
    fn test_title_overlap_raises_title_score() {
        let scored = score_with(&SummarizerConfig::default());
        assert!(scored.score(1).unwrap().title_terms() > 0.0);
        assert_eq!(scored.score(2).unwrap().title_terms(), 0.0);
    }

    #[test]
    fn test_normalized_position_mode() {
        let scored = score_with(&SummarizerConfig::default());
        // Paragraph 1 of 3, sentences 0 and 1 of 2.
        assert!((scored.score(1).unwrap().position() - 2.0 / 3.0).abs() < 1e-12);
        assert!((scored.score(2).unwrap().position() - 1.0 / 3.0).abs() < 1e-12);
        assert!((scored.score(3).unwrap().position() - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_paragraph_opener_mode() {
        let config = SummarizerConfig::builder()
            .position_mode(PositionMode::ParagraphOpener)
            .build()
            .unwrap();
        let normal = score_with(&SummarizerConfig::default());
        let boosted = score_with(&config);

        let opener = boosted.score(1).unwrap();
        assert_eq!(opener.position(), 0.0);
        let expected = normal.score(1).unwrap().term_importance() * 1.85;
        assert!((opener.term_importance() - expected).abs() < 1e-12);
        assert_eq!(
            boosted.score(2).unwrap().term_importance(),
            normal.score(2).unwrap().term_importance()
        );
    }

    #[test]
    fn test_local_mode_uses_sentence_frequency() {
        let config = SummarizerConfig::builder()
            .term_mode(TermMode::Local)
            .build()
            .unwrap();
        let scored = scorer(&config).score(document(), DocumentId::new(0), &stats());

        // "πολεμ" occurs in one of three body sentences.
        let s = scorer(&config);
        let stems = s.normalizer().comparable_stems("Ο πόλεμος ξεκίνησε νωρίς.");
        let expected = 0.1 * 3f64.log10() * stems.len() as f64;
        assert!((scored.score(1).unwrap().term_importance() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_scores_are_deterministic() {
        let s = scorer(&SummarizerConfig::default());
        let first = s.score(document(), DocumentId::new(0), &stats());
        let second = s.score(document(), DocumentId::new(0), &stats());
        let a: Vec<_> = first.iter().map(|(_, b)| b.copied()).collect();
        let b: Vec<_> = second.iter().map(|(_, b)| b.copied()).collect();
        assert_eq!(a, b);
    }
}
