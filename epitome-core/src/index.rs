//! Corpus term-statistics index
//!
//! Documents are analysed into stem counts by an [`IndexBuilder`]. Once every
//! document is added, [`IndexBuilder::build`] freezes the counts into a
//! [`CorpusIndex`], the only type that answers [`TermStatistics`] queries.

use crate::error::{Error, Result};
use crate::scoring::{DocumentId, TermStatistics};
use crate::text::Normalizer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

const INDEX_FORMAT_VERSION: u32 = 1;

/// Stem counts of one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct IndexedDocument {
    name: String,
    terms: HashMap<String, usize>,
    total_terms: usize,
}

impl IndexedDocument {
    fn analyse(normalizer: &Normalizer, name: String, text: &str) -> Self {
        let mut terms: HashMap<String, usize> = HashMap::new();
        let mut total_terms = 0;
        for stem in normalizer.comparable_stems(text) {
            *terms.entry(stem).or_insert(0) += 1;
            total_terms += 1;
        }
        Self {
            name,
            terms,
            total_terms,
        }
    }
}

/// Accumulates documents before the corpus statistics are frozen
#[derive(Debug)]
pub struct IndexBuilder {
    normalizer: Normalizer,
    documents: Vec<IndexedDocument>,
    names: HashMap<String, DocumentId>,
}

impl IndexBuilder {
    pub fn new(normalizer: Normalizer) -> Self {
        Self {
            normalizer,
            documents: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Analyse and register a document.
    ///
    /// Adding a name twice replaces the earlier content and keeps its id.
    pub fn add_document(&mut self, name: impl Into<String>, text: &str) -> DocumentId {
        let document = IndexedDocument::analyse(&self.normalizer, name.into(), text);
        self.insert(document)
    }

    /// Analyse documents on the rayon pool and register them in order
    #[cfg(feature = "parallel")]
    pub fn add_documents<N, T>(&mut self, documents: Vec<(N, T)>) -> Vec<DocumentId>
    where
        N: Into<String> + Send,
        T: AsRef<str> + Send,
    {
        use rayon::prelude::*;

        let normalizer = &self.normalizer;
        let analysed: Vec<IndexedDocument> = documents
            .into_par_iter()
            .map(|(name, text)| IndexedDocument::analyse(normalizer, name.into(), text.as_ref()))
            .collect();

        analysed.into_iter().map(|d| self.insert(d)).collect()
    }

    fn insert(&mut self, document: IndexedDocument) -> DocumentId {
        if let Some(&id) = self.names.get(&document.name) {
            log::warn!("Document '{}' indexed twice; keeping the latest text", document.name);
            self.documents[id.index()] = document;
            return id;
        }

        let id = DocumentId::new(self.documents.len());
        log::trace!(
            "Indexed '{}' as {id}: {} terms, {} distinct",
            document.name,
            document.total_terms,
            document.terms.len()
        );
        self.names.insert(document.name.clone(), id);
        self.documents.push(document);
        id
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Freeze the corpus
    pub fn build(self) -> CorpusIndex {
        CorpusIndex::from_documents(self.documents)
    }
}

#[derive(Serialize)]
struct IndexFileRef<'a> {
    version: u32,
    documents: &'a [IndexedDocument],
}

#[derive(Deserialize)]
struct IndexFile {
    version: u32,
    documents: Vec<IndexedDocument>,
}

/// Immutable term statistics over a complete corpus
#[derive(Debug, Clone, Default)]
pub struct CorpusIndex {
    documents: Vec<IndexedDocument>,
    document_frequency: HashMap<String, usize>,
    names: HashMap<String, DocumentId>,
}

impl CorpusIndex {
    fn from_documents(documents: Vec<IndexedDocument>) -> Self {
        let mut document_frequency: HashMap<String, usize> = HashMap::new();
        let mut names = HashMap::with_capacity(documents.len());

        for (i, document) in documents.iter().enumerate() {
            names.insert(document.name.clone(), DocumentId::new(i));
            for stem in document.terms.keys() {
                *document_frequency.entry(stem.clone()).or_insert(0) += 1;
            }
        }

        log::debug!(
            "Corpus index: {} documents, {} distinct terms",
            documents.len(),
            document_frequency.len()
        );

        Self {
            documents,
            document_frequency,
            names,
        }
    }

    /// Id of the document registered under `name`
    pub fn document_id(&self, name: &str) -> Option<DocumentId> {
        self.names.get(name).copied()
    }

    pub fn document_name(&self, id: DocumentId) -> Option<&str> {
        self.documents.get(id.index()).map(|d| d.name.as_str())
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Number of distinct terms in the corpus
    pub fn term_count(&self) -> usize {
        self.document_frequency.len()
    }

    /// Write the index as JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|e| Error::io(path, e))?;
        let mut writer = BufWriter::new(file);
        let contents = IndexFileRef {
            version: INDEX_FORMAT_VERSION,
            documents: &self.documents,
        };
        serde_json::to_writer(&mut writer, &contents)
            .map_err(|e| Error::Index(format!("Failed to serialize index: {e}")))?;
        writer.flush().map_err(|e| Error::io(path, e))
    }

    /// Read an index written by [`CorpusIndex::save`]
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let contents: IndexFile = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| Error::Index(format!("Failed to read '{}': {e}", path.display())))?;

        if contents.version != INDEX_FORMAT_VERSION {
            return Err(Error::Index(format!(
                "Unsupported index format version {} (expected {})",
                contents.version, INDEX_FORMAT_VERSION
            )));
        }

        Ok(Self::from_documents(contents.documents))
    }
}

impl TermStatistics for CorpusIndex {
    fn term_frequency(&self, stem: &str, document: DocumentId) -> f64 {
        let Some(entry) = self.documents.get(document.index()) else {
            return 0.0;
        };
        if entry.total_terms == 0 {
            return 0.0;
        }
        entry.terms.get(stem).copied().unwrap_or(0) as f64 / entry.total_terms as f64
    }

    fn document_frequency(&self, stem: &str) -> usize {
        self.document_frequency.get(stem).copied().unwrap_or(0)
    }

    fn total_documents(&self) -> usize {
        self.documents.len()
    }

    fn total_term_count(&self, document: DocumentId) -> usize {
        self.documents
            .get(document.index())
            .map_or(0, |d| d.total_terms)
    }
}
