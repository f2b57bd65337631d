//! Sentence selection

use crate::config::SelectionConfig;
use crate::scoring::ScoredDocument;
use crate::segment::{Sentence, SentenceKind};

/// Number of sentences to keep from a pool of `pool` candidates.
///
/// Keeps the complement of the compression ratio, but never fewer than
/// `min_sentences`, and a pool no larger than `min_sentences` is kept whole.
pub fn target_count(pool: usize, compression_ratio: f64, min_sentences: usize) -> usize {
    let discard = (pool as f64 * compression_ratio.clamp(0.0, 1.0)).round() as usize;
    pool.saturating_sub(discard).max(min_sentences.min(pool))
}

/// Picks the highest-weighted sentences of a scored document
#[derive(Debug, Clone, Copy)]
pub struct Selector {
    min_words: usize,
    compression_ratio: f64,
    min_sentences: usize,
    show_titles: bool,
}

impl Selector {
    pub fn new(config: &SelectionConfig) -> Self {
        Self {
            min_words: config.min_words,
            compression_ratio: config.compression_ratio(),
            min_sentences: config.min_sentences,
            show_titles: config.show_titles,
        }
    }

    /// Whether a sentence competes for selection
    pub fn is_candidate(&self, sentence: &Sentence) -> bool {
        sentence.kind() == SentenceKind::Sentence && sentence.word_count() > self.min_words
    }

    /// Selected sentences in document order
    pub fn select<'a>(&self, scored: &'a ScoredDocument) -> Vec<&'a Sentence> {
        let mut candidates: Vec<(&Sentence, f64)> = scored
            .iter()
            .filter(|(sentence, _)| self.is_candidate(sentence))
            .filter_map(|(sentence, score)| score.map(|s| (sentence, s.composite())))
            .collect();

        let target = target_count(candidates.len(), self.compression_ratio, self.min_sentences);
        candidates.sort_by(|(a, wa), (b, wb)| {
            wb.total_cmp(wa).then_with(|| a.position().cmp(&b.position()))
        });
        candidates.truncate(target);

        let mut selected: Vec<&Sentence> = candidates.into_iter().map(|(s, _)| s).collect();
        if self.show_titles {
            selected.extend(
                scored
                    .document()
                    .sentences()
                    .filter(|s| s.kind().is_heading()),
            );
        }
        selected.sort_by_key(|s| s.position());

        log::debug!(
            "Selected {} of {} sentences (target {})",
            selected.len(),
            scored.document().sentence_count(),
            target
        );
        selected
    }
}
