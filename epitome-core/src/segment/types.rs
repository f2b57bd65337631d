use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a sentence in the document layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SentenceKind {
    Title,
    Subtitle,
    Sentence,
}

impl SentenceKind {
    /// Titles and subtitles, which feed the title dictionary instead of competing
    pub fn is_heading(self) -> bool {
        matches!(self, SentenceKind::Title | SentenceKind::Subtitle)
    }
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SentenceKind::Title => "TITLE",
            SentenceKind::Subtitle => "SUBTITLE",
            SentenceKind::Sentence => "SENTENCE",
        };
        f.write_str(name)
    }
}

/// An immutable sentence of a segmented document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    text: String,
    position: usize,
    paragraph_position: usize,
    kind: SentenceKind,
    word_count: usize,
}

impl Sentence {
    /// Create a sentence, collapsing internal whitespace of `text`
    pub fn new(
        text: &str,
        position: usize,
        paragraph_position: usize,
        kind: SentenceKind,
    ) -> Self {
        let words: Vec<&str> = text.split_whitespace().collect();
        Self {
            word_count: words.len(),
            text: words.join(" "),
            position,
            paragraph_position,
            kind,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Document-global position, 0-based
    pub fn position(&self) -> usize {
        self.position
    }

    /// Position within the enclosing paragraph, 0-based
    pub fn paragraph_position(&self) -> usize {
        self.paragraph_position
    }

    pub fn kind(&self) -> SentenceKind {
        self.kind
    }

    /// Number of words in the original, unstemmed text
    pub fn word_count(&self) -> usize {
        self.word_count
    }
}

/// An ordered run of sentences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    position: usize,
    sentences: Vec<Sentence>,
}

impl Paragraph {
    /// Document-global position, 0-based
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// A segmented document
///
/// Sentence positions run `0..sentence_count()` in reading order, so a
/// sentence's position doubles as its index in [`Document::sentences`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    paragraphs: Vec<Paragraph>,
    sentence_count: usize,
}

impl Document {
    /// Assemble a document from paragraphs of `(text, kind)` pairs.
    ///
    /// Positions are assigned in order. Sentences whose text is blank are
    /// dropped, as are paragraphs left without sentences.
    pub fn from_parts<P, S>(parts: P) -> Self
    where
        P: IntoIterator<Item = S>,
        S: IntoIterator<Item = (String, SentenceKind)>,
    {
        let mut paragraphs = Vec::new();
        let mut position = 0;

        for part in parts {
            let mut sentences = Vec::new();
            for (text, kind) in part {
                if text.trim().is_empty() {
                    continue;
                }
                sentences.push(Sentence::new(&text, position, sentences.len(), kind));
                position += 1;
            }
            if !sentences.is_empty() {
                paragraphs.push(Paragraph {
                    position: paragraphs.len(),
                    sentences,
                });
            }
        }

        Self {
            paragraphs,
            sentence_count: position,
        }
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// All sentences in reading order
    pub fn sentences(&self) -> impl Iterator<Item = &Sentence> + '_ {
        self.paragraphs.iter().flat_map(|p| p.sentences.iter())
    }

    pub fn sentence(&self, position: usize) -> Option<&Sentence> {
        self.sentences().nth(position)
    }

    pub fn sentence_count(&self) -> usize {
        self.sentence_count
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}
