//! Paragraph and sentence segmentation
//!
//! Blank lines separate paragraph blocks. Each block is scanned for
//! sentence boundaries, candidate boundaries that look like abbreviations
//! are discarded, and layout heuristics tag titles and subtitles.

use super::scanner::{BoundaryScanner, CharClass, TerminatorScanner, UnicodeScanner};
use super::types::{Document, SentenceKind};
use crate::config::{ScannerKind, SegmentationConfig};
use crate::language::LanguageResources;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static LIST_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(?:\.\d+)*\.$").expect("list marker pattern is valid"));

type Part = Vec<(String, SentenceKind)>;

/// Per-document segmentation state
#[derive(Debug, Default)]
struct SegmentState {
    parts: Vec<Part>,
    /// Still waiting for the first accepted sentence of the document
    first_pending: bool,
    title_found: bool,
    /// The first subtitle-shaped paragraph has been seen
    promotion_considered: bool,
}

/// Splits raw text into a [`Document`]
pub struct Segmenter {
    scanner: Box<dyn BoundaryScanner>,
    terminators: CharClass,
    closing: CharClass,
    abbreviation_span: usize,
    subtitle_max_words: usize,
    title_max_words: usize,
}

impl fmt::Debug for Segmenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Segmenter")
            .field("abbreviation_span", &self.abbreviation_span)
            .field("subtitle_max_words", &self.subtitle_max_words)
            .field("title_max_words", &self.title_max_words)
            .finish_non_exhaustive()
    }
}

impl Segmenter {
    /// Create a segmenter using the scanner selected in `config`
    pub fn new(resources: &LanguageResources, config: &SegmentationConfig) -> Self {
        let tables = &resources.segmentation;
        let scanner: Box<dyn BoundaryScanner> = match config.scanner {
            ScannerKind::Terminator => {
                Box::new(TerminatorScanner::new(&tables.terminators, &tables.closing))
            }
            ScannerKind::Unicode => Box::new(UnicodeScanner),
        };
        Self::with_scanner(resources, config, scanner)
    }

    /// Create a segmenter around an injected boundary scanner
    pub fn with_scanner(
        resources: &LanguageResources,
        config: &SegmentationConfig,
        scanner: Box<dyn BoundaryScanner>,
    ) -> Self {
        let tables = &resources.segmentation;
        Self {
            scanner,
            terminators: CharClass::new(&tables.terminators),
            closing: CharClass::new(&tables.closing),
            abbreviation_span: config.abbreviation_span,
            subtitle_max_words: config.subtitle_max_words,
            title_max_words: config.title_max_words,
        }
    }

    /// Segment raw text. Empty or blank input yields an empty document.
    pub fn segment(&self, raw_text: &str) -> Document {
        let text = raw_text.replace("\r\n", "\n").replace('\r', "\n");
        let mut state = SegmentState {
            first_pending: true,
            ..SegmentState::default()
        };

        for block in split_blocks(&text) {
            self.segment_block(&block, &mut state);
        }

        let document = Document::from_parts(state.parts);
        log::debug!(
            "Segmented {} paragraphs, {} sentences",
            document.paragraph_count(),
            document.sentence_count()
        );
        document
    }

    fn segment_block(&self, block: &str, state: &mut SegmentState) {
        let mut current: Part = Vec::new();

        for sentence in self.split_sentences(block) {
            if sentence.trim().is_empty() {
                continue;
            }

            if state.first_pending {
                state.first_pending = false;
                if let Some((title, rest)) = split_title_line(sentence) {
                    log::trace!("Title split from first sentence: {title:?}");
                    let title = collapse(title).to_uppercase();
                    state.parts.push(vec![(title, SentenceKind::Title)]);
                    state.title_found = true;
                    current.push((collapse(rest), SentenceKind::Sentence));
                    continue;
                }
            }

            current.push((collapse(sentence), SentenceKind::Sentence));
        }

        if current.is_empty() {
            return;
        }

        if current.len() == 1 {
            self.classify_single(&mut current[0], state);
        }
        state.parts.push(current);
    }

    /// Apply the subtitle and title-promotion rules to a one-sentence paragraph
    fn classify_single(&self, entry: &mut (String, SentenceKind), state: &mut SegmentState) {
        let (text, kind) = entry;
        let word_count = text.split_whitespace().count();
        if !self.is_subtitle_shaped(text, word_count) {
            return;
        }

        if !state.title_found && !state.promotion_considered {
            state.promotion_considered = true;
            if word_count < self.title_max_words {
                *text = text.to_uppercase();
                *kind = SentenceKind::Title;
                state.title_found = true;
                return;
            }
        }

        *kind = SentenceKind::Subtitle;
    }

    fn is_subtitle_shaped(&self, text: &str, word_count: usize) -> bool {
        let starts_upper = text
            .chars()
            .find(|c| c.is_alphabetic())
            .is_some_and(char::is_uppercase);
        let open_ended = text
            .trim_end_matches(|c| self.closing.contains(c))
            .chars()
            .last()
            .is_some_and(|c| !self.terminators.contains(c));

        starts_upper && open_ended && word_count < self.subtitle_max_words
    }

    /// Raw sentence slices of a block, in order, covering the whole block
    fn split_sentences<'a>(&self, block: &'a str) -> Vec<&'a str> {
        // Replacing '\n' with ' ' keeps byte offsets valid in `block`.
        let flat = block.replace('\n', " ");
        let mut sentences = Vec::new();
        let mut start = 0;

        for offset in self.scanner.boundaries(&flat) {
            if offset <= start || offset > block.len() {
                continue;
            }
            if self.is_abbreviation(&flat[start..offset]) {
                continue;
            }
            sentences.push(&block[start..offset]);
            start = offset;
        }

        if start < block.len() {
            sentences.push(&block[start..]);
        }
        sentences
    }

    /// Whether a candidate sentence ends in an abbreviation rather than a break
    fn is_abbreviation(&self, candidate: &str) -> bool {
        let body = candidate
            .trim_end()
            .trim_end_matches(|c| self.closing.contains(c));
        let run_start = body
            .char_indices()
            .rev()
            .take_while(|&(_, c)| self.terminators.contains(c))
            .last()
            .map(|(i, _)| i);
        let Some(run_start) = run_start else {
            return false;
        };
        if &body[run_start..] != "." {
            return false;
        }

        let before = &body[..run_start];
        let (word, separated) = match before.rfind(|c: char| c.is_whitespace() || c == '.') {
            Some(i) => {
                let sep_len = before[i..].chars().next().map_or(1, char::len_utf8);
                (&before[i + sep_len..], true)
            }
            None => (before, false),
        };
        let span = word.chars().count() + 1 + usize::from(separated);
        if span > self.abbreviation_span {
            return false;
        }

        let token_start = before
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + before[i..].chars().next().map_or(1, char::len_utf8));
        let token = &body[token_start..];
        !LIST_MARKER.is_match(token)
    }
}

/// Split text into blank-line separated blocks
fn split_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut lines: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if line.trim().is_empty() {
            if !lines.is_empty() {
                blocks.push(lines.join("\n"));
                lines.clear();
            }
        } else {
            lines.push(line);
        }
    }
    if !lines.is_empty() {
        blocks.push(lines.join("\n"));
    }

    blocks
}

/// Split at the first line break followed by an uppercase letter
fn split_title_line(sentence: &str) -> Option<(&str, &str)> {
    sentence.match_indices('\n').find_map(|(i, _)| {
        let (title, rest) = (&sentence[..i], &sentence[i + 1..]);
        let next_upper = rest.chars().next().is_some_and(char::is_uppercase);
        (next_upper && !title.trim().is_empty()).then_some((title, rest))
    })
}

fn collapse(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::get_language_resources;
    use crate::segment::Sentence;

    fn segmenter() -> Segmenter {
        let resources = get_language_resources("el").unwrap();
        Segmenter::new(resources, &SegmentationConfig::default())
    }

    fn kinds(document: &Document) -> Vec<SentenceKind> {
        document.sentences().map(Sentence::kind).collect()
    }

    fn texts(document: &Document) -> Vec<&str> {
        document.sentences().map(Sentence::text).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(segmenter().segment("").is_empty());
        assert!(segmenter().segment("  \n\n \t\n").is_empty());
    }

    #[test]
    fn test_title_block_and_sentences() {
        let document = segmenter().segment(
            "ΤΙΤΛΟΣ\n\nΠρώτη πρόταση. Δεύτερη πρόταση με περισσότερες λέξεις εδώ.",
        );

        assert_eq!(
            kinds(&document),
            vec![
                SentenceKind::Title,
                SentenceKind::Sentence,
                SentenceKind::Sentence
            ]
        );
        let positions: Vec<_> = document.sentences().map(Sentence::position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(document.paragraph_count(), 2);
    }

    #[test]
    fn test_title_split_from_first_line() {
        let document =
            segmenter().segment("Η ιστορία της πόλης\nΗ πόλη χτίστηκε νωρίς. Μεγάλωσε γρήγορα.");

        let title = document.sentences().next().unwrap();
        assert_eq!(title.kind(), SentenceKind::Title);
        assert_eq!(title.text(), "Η ιστορία της πόλης".to_uppercase());
        assert_eq!(
            texts(&document)[1..],
            ["Η πόλη χτίστηκε νωρίς.", "Μεγάλωσε γρήγορα."]
        );
        assert_eq!(document.paragraph_count(), 2);
        assert_eq!(document.sentence(1).unwrap().paragraph_position(), 0);
    }

    #[test]
    fn test_lowercase_continuation_is_not_a_title() {
        let document = segmenter().segment("Η πόλη χτίστηκε\nπολύ νωρίς. Μεγάλωσε γρήγορα.");
        assert_eq!(
            texts(&document),
            vec!["Η πόλη χτίστηκε πολύ νωρίς.", "Μεγάλωσε γρήγορα."]
        );
        assert!(kinds(&document).iter().all(|k| *k == SentenceKind::Sentence));
    }

    #[test]
    fn test_subtitles_after_title() {
        let document = segmenter().segment(
            "ΤΙΤΛΟΣ\n\nΕισαγωγή\n\nΤο κείμενο αρχίζει εδώ. Και συνεχίζει.\n\n2.1 Μέθοδος",
        );
        assert_eq!(
            kinds(&document),
            vec![
                SentenceKind::Title,
                SentenceKind::Subtitle,
                SentenceKind::Sentence,
                SentenceKind::Sentence,
                SentenceKind::Subtitle
            ]
        );
    }

    #[test]
    fn test_long_first_heading_becomes_subtitle() {
        let document = segmenter().segment(
            "Μια αρκετά μεγάλη επικεφαλίδα με οκτώ λέξεις\n\nΚείμενο εδώ. Και άλλο.\n\nΕπίλογος",
        );
        let kinds = kinds(&document);
        assert_eq!(kinds[0], SentenceKind::Subtitle);
        // Promotion is decided once, so a later short heading stays a subtitle.
        assert_eq!(kinds[3], SentenceKind::Subtitle);
    }

    #[test]
    fn test_terminated_single_sentence_stays_sentence() {
        let document = segmenter().segment("Πρόλογος.\n\nΚείμενο εδώ.");
        assert!(kinds(&document).iter().all(|k| *k == SentenceKind::Sentence));
    }

    #[test]
    fn test_abbreviation_guard() {
        let document = segmenter().segment("Ο κ. Παπαδόπουλος ήρθε χθες. Έφυγε σήμερα.");
        assert_eq!(
            texts(&document),
            vec!["Ο κ. Παπαδόπουλος ήρθε χθες.", "Έφυγε σήμερα."]
        );
    }

    #[test]
    fn test_initials_are_not_breaks() {
        let document = segmenter().segment("Το έγραψε ο Γ. Σεφέρης το 1935. Έγινε γνωστό.");
        assert_eq!(document.sentence_count(), 2);
    }

    #[test]
    fn test_numbered_list_marker_is_a_break() {
        let document = segmenter().segment("Σημεία προς συζήτηση: 1. Πρώτο θέμα συζήτησης.");
        assert_eq!(
            texts(&document),
            vec!["Σημεία προς συζήτηση: 1.", "Πρώτο θέμα συζήτησης."]
        );
    }

    #[test]
    fn test_other_terminators_skip_guard() {
        let document = segmenter().segment("Τι; Ναι! Όχι\u{037E} Ίσως.");
        assert_eq!(document.sentence_count(), 4);
    }

    #[test]
    fn test_crlf_and_whitespace_blank_lines() {
        let document =
            segmenter().segment("Πρώτη παράγραφος εδώ.\r\n \t\r\nΔεύτερη παράγραφος εδώ.");
        assert_eq!(document.paragraph_count(), 2);
    }

    #[test]
    fn test_positions_strictly_increase() {
        let document = segmenter().segment(
            "ΤΙΤΛΟΣ\n\nΑ πρόταση εδώ. Β πρόταση εδώ.\n\nΥπότιτλος\n\nΓ πρόταση εδώ. Δ πρόταση.",
        );
        let positions: Vec<_> = document.sentences().map(Sentence::position).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        let paragraphs: Vec<_> = document.paragraphs().iter().map(|p| p.position()).collect();
        assert_eq!(paragraphs, (0..document.paragraph_count()).collect::<Vec<_>>());
    }

    #[test]
    fn test_unicode_scanner_selection() {
        let resources = get_language_resources("el").unwrap();
        let config = SegmentationConfig {
            scanner: ScannerKind::Unicode,
            ..SegmentationConfig::default()
        };
        let document =
            Segmenter::new(resources, &config).segment("Πρώτη πρόταση εδώ. Δεύτερη πρόταση εδώ.");
        assert_eq!(document.sentence_count(), 2);
    }
}
