pub mod author;
pub mod date;
pub mod document;
pub mod persist;

use std::{
    fmt,
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
    sync::Arc,
};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    config::SearchConfig,
    corpus::{author::Author, date::parse_date, document::Document},
    error::Result,
    fulltext::{concordance::Concordance, FullTextCache, SearchHit},
};

/// Store-assigned document id. Starts at 1 and only grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DocId(pub u64);

impl DocId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of [`Corpus::load`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub loaded: usize,
    pub skipped: usize,
}

/// Append-only, insertion-ordered document store.
///
/// Besides the documents it keeps the per-author aggregation and the
/// full-text cache used by [`search`](Self::search) and
/// [`concordance`](Self::concordance). Adding a document invalidates the
/// cache; the next read rebuilds it before answering. Both reads take
/// `&mut self`, so a query can never interleave with a write.
///
/// A [`SearchEngine`](crate::SearchEngine) built from a corpus is a snapshot:
/// documents added afterwards are not visible to it.
#[derive(Debug, Clone)]
pub struct Corpus {
    pub name: String,
    documents: IndexMap<DocId, Arc<Document>>,
    next_id: u64,
    authors: IndexMap<String, Author>,
    full_text: FullTextCache,
}

impl Corpus {
    pub fn new(name: impl Into<String>) -> Self {
        Corpus {
            name: name.into(),
            documents: IndexMap::new(),
            next_id: 1,
            authors: IndexMap::new(),
            full_text: FullTextCache::new(SearchConfig::default().separator),
        }
    }

    pub fn with_config(name: impl Into<String>, config: &SearchConfig) -> Result<Self> {
        config.validate()?;
        let mut corpus = Self::new(name);
        corpus.full_text = FullTextCache::new(config.separator);
        Ok(corpus)
    }

    /// Add a document and return its id.
    ///
    /// The document is also filed under its author; a second document with
    /// the same (author, title) keeps its place in the store but is not
    /// added to the author's production.
    pub fn add_document(&mut self, doc: Document) -> DocId {
        let id = DocId(self.next_id);
        self.next_id += 1;
        let doc = Arc::new(doc);
        self.authors
            .entry(doc.author.clone())
            .or_insert_with(|| Author::new(doc.author.clone()))
            .add(&doc.title, Arc::clone(&doc));
        self.documents.insert(id, doc);
        self.full_text.invalidate();
        id
    }

    pub fn get(&self, id: DocId) -> Option<&Arc<Document>> {
        self.documents.get(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// (id, document) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (DocId, &Arc<Document>)> + '_ {
        self.documents.iter().map(|(id, doc)| (*id, doc))
    }

    /// documents in insertion order
    pub fn documents(&self) -> impl Iterator<Item = &Arc<Document>> + '_ {
        self.documents.values()
    }

    pub fn authors(&self) -> &IndexMap<String, Author> {
        &self.authors
    }

    pub fn author(&self, name: &str) -> Option<&Author> {
        self.authors.get(name)
    }

    /// Whole-word keyword search over every document body.
    /// See [`FullText::search`](crate::fulltext::FullText::search).
    pub fn search(&mut self, keyword: &str, context: usize) -> Result<Vec<SearchHit>> {
        self.full_text.ensure_built(&self.documents).search(keyword, context)
    }

    /// Regular-expression concordance over every document body.
    /// See [`FullText::concordance`](crate::fulltext::FullText::concordance).
    pub fn concordance(&mut self, pattern: &str, context: usize) -> Result<Concordance> {
        self.full_text.ensure_built(&self.documents).concordance(pattern, context)
    }

    /// The `n` most recent documents, newest first.
    ///
    /// Fails if any document date cannot be parsed; the store is untouched.
    pub fn sorted_by_date(&self, n: usize) -> Result<Vec<&Arc<Document>>> {
        let mut dated = self
            .documents
            .values()
            .map(|doc| Ok((parse_date(&doc.date)?, doc)))
            .collect::<Result<Vec<_>>>()?;
        // stable: equal dates keep insertion order
        dated.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(dated.into_iter().take(n).map(|(_, doc)| doc).collect())
    }

    /// The first `n` documents by title.
    pub fn sorted_by_title(&self, n: usize) -> Vec<&Arc<Document>> {
        let mut docs: Vec<&Arc<Document>> = self.documents.values().collect();
        docs.sort_by(|a, b| a.title.cmp(&b.title));
        docs.truncate(n);
        docs
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())?;
        persist::write_tsv(BufWriter::new(file), self)?;
        info!(path = %path.as_ref().display(), documents = self.len(), "corpus saved");
        Ok(())
    }

    /// Replace the contents with the documents of a corpus file.
    ///
    /// Ids restart at 1 and are reassigned in file order. Malformed rows are
    /// skipped with a warning.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadReport> {
        let file = File::open(path.as_ref())?;
        let rows = persist::read_tsv(BufReader::new(file))?;

        self.documents.clear();
        self.authors.clear();
        self.next_id = 1;
        self.full_text.invalidate();

        let mut report = LoadReport::default();
        for row in rows {
            match row {
                Ok(row) => {
                    self.add_document(row.document);
                    report.loaded += 1;
                }
                Err(e) => {
                    warn!(error = %e, "skipping malformed corpus row");
                    report.skipped += 1;
                }
            }
        }
        info!(
            path = %path.as_ref().display(),
            loaded = report.loaded,
            skipped = report.skipped,
            "corpus loaded"
        );
        Ok(report)
    }
}

impl fmt::Display for Corpus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Corpus '{}' with {} documents and {} authors",
            self.name,
            self.documents.len(),
            self.authors.len()
        )
    }
}
