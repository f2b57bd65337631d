//! Sentence-boundary scanners
//!
//! A scanner only reports candidate boundaries. Deciding which of them are
//! real sentence breaks is the segmenter's job.

use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

/// Character set with an ASCII fast path
#[derive(Debug, Clone)]
pub(crate) struct CharClass {
    chars: HashSet<char>,
    ascii_lookup: [bool; 128],
}

impl CharClass {
    pub(crate) fn new(chars: &[char]) -> Self {
        let mut ascii_lookup = [false; 128];
        for &ch in chars {
            if ch.is_ascii() {
                ascii_lookup[ch as usize] = true;
            }
        }
        Self {
            chars: chars.iter().copied().collect(),
            ascii_lookup,
        }
    }

    #[inline]
    pub(crate) fn contains(&self, ch: char) -> bool {
        if ch.is_ascii() {
            self.ascii_lookup[ch as usize]
        } else {
            self.chars.contains(&ch)
        }
    }
}

/// Source of candidate sentence boundaries
pub trait BoundaryScanner: Send + Sync {
    /// Byte offsets just past each candidate sentence end, ascending
    fn boundaries(&self, text: &str) -> Vec<usize>;
}

/// Boundaries at runs of terminator characters
///
/// Closing quotes and brackets directly after the run belong to it. A run
/// only counts when followed by whitespace or the end of the text, so
/// decimals and dotted codes stay in one piece.
#[derive(Debug, Clone)]
pub struct TerminatorScanner {
    terminators: CharClass,
    closing: CharClass,
}

impl TerminatorScanner {
    pub fn new(terminators: &[char], closing: &[char]) -> Self {
        Self {
            terminators: CharClass::new(terminators),
            closing: CharClass::new(closing),
        }
    }
}

impl BoundaryScanner for TerminatorScanner {
    fn boundaries(&self, text: &str) -> Vec<usize> {
        let mut boundaries = Vec::new();
        let mut chars = text.char_indices().peekable();

        while let Some((_, ch)) = chars.next() {
            if !self.terminators.contains(ch) {
                continue;
            }

            while chars
                .next_if(|&(_, c)| self.terminators.contains(c))
                .is_some()
            {}
            while chars.next_if(|&(_, c)| self.closing.contains(c)).is_some() {}

            match chars.peek() {
                None => boundaries.push(text.len()),
                Some(&(offset, next)) if next.is_whitespace() => boundaries.push(offset),
                Some(_) => {}
            }
        }

        boundaries
    }
}

/// Boundaries from Unicode sentence segmentation (UAX #29)
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeScanner;

impl BoundaryScanner for UnicodeScanner {
    fn boundaries(&self, text: &str) -> Vec<usize> {
        text.split_sentence_bound_indices()
            .filter_map(|(start, sentence)| {
                let trimmed = sentence.trim_end();
                (!trimmed.is_empty()).then(|| start + trimmed.len())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greek_scanner() -> TerminatorScanner {
        TerminatorScanner::new(
            &['.', '!', '?', ';', '\u{037E}', '…'],
            &['»', '"', '”', ')'],
        )
    }

    fn pieces<'a>(text: &'a str, boundaries: &[usize]) -> Vec<&'a str> {
        let mut start = 0;
        boundaries
            .iter()
            .map(|&end| {
                let piece = text[start..end].trim();
                start = end;
                piece
            })
            .collect()
    }

    #[test]
    fn test_char_class() {
        let class = CharClass::new(&['.', '\u{037E}']);
        assert!(class.contains('.'));
        assert!(class.contains('\u{037E}'));
        assert!(!class.contains('!'));
        assert!(!class.contains('α'));
    }

    #[test]
    fn test_terminator_runs() {
        let text = "Τι έγινε\u{037E} Ποιος ξέρει!!! Τέλος.";
        let boundaries = greek_scanner().boundaries(text);
        assert_eq!(
            pieces(text, &boundaries),
            vec!["Τι έγινε\u{037E}", "Ποιος ξέρει!!!", "Τέλος."]
        );
    }

    #[test]
    fn test_closing_characters_join_the_run() {
        let text = "Είπε «φύγε.» Και έφυγε.";
        let boundaries = greek_scanner().boundaries(text);
        assert_eq!(pieces(text, &boundaries), vec!["Είπε «φύγε.»", "Και έφυγε."]);
    }

    #[test]
    fn test_terminator_inside_token_is_ignored() {
        let text = "Κόστισε 3.5 ευρώ. Τέλος";
        assert_eq!(greek_scanner().boundaries(text), vec![text.find(" Τέλος").unwrap()]);
    }

    #[test]
    fn test_no_terminators() {
        assert!(greek_scanner().boundaries("χωρίς τέλος").is_empty());
        assert!(greek_scanner().boundaries("").is_empty());
    }

    #[test]
    fn test_unicode_scanner() {
        let text = "Hello there. How are you? Fine.";
        let boundaries = UnicodeScanner.boundaries(text);
        assert_eq!(
            pieces(text, &boundaries),
            vec!["Hello there.", "How are you?", "Fine."]
        );
        assert_eq!(*boundaries.last().unwrap(), text.len());
    }
}
