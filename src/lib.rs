//! This crate is a document search engine: a corpus store with full-text
//! keyword search and concordance, plus TF-IDF ranked retrieval.

pub mod config;
pub mod corpus;
pub mod error;
pub mod fulltext;
pub mod utils;
pub mod vectorizer;

/// Corpus
/// The document store. It owns every document, keyed by a 1-based [`DocId`]
/// in insertion order, and groups them by author.
///
/// It also carries the lazily built full-text cache used by
/// `search` and `concordance`. Adding a document invalidates the cache; the
/// next query rebuilds it.
///
/// # Persistence
/// `save` and `load` read and write a tab-separated corpus file.
pub use corpus::Corpus;

/// Document and its source-specific variant
pub use corpus::document::{Document, DocumentKind};

/// Identifier of a document within a [`Corpus`]
pub use corpus::{DocId, LoadReport};

/// Author with its documents
pub use corpus::author::Author;

/// Search Engine
/// A TF-IDF snapshot of a set of documents.
///
/// Internally, it holds:
/// - The vocabulary with per-term statistics
/// - The sparse term-frequency matrix
/// - The IDF vector
/// - The sparse TF-IDF matrix
///
/// `SearchEngine<E>` takes the weighting engine as a generic parameter
/// (default [`DefaultTFIDFEngine`]). The engine does not follow later changes
/// of the corpus it was built from.
pub use vectorizer::SearchEngine;

/// Vocabulary and term statistics
pub use vectorizer::vocab::{TermStats, Vocabulary};

/// TF-IDF Engine
/// Implement [`TFIDFEngine`] to change how IDF is computed.
pub use vectorizer::tfidf::{DefaultTFIDFEngine, TFIDFEngine};

/// Query vector and ranking results
pub use vectorizer::evaluate::{
    query::QueryVector,
    scoring::{HitEntry, Hits, RankedDocument},
};

/// Full-text search results
pub use fulltext::{
    concordance::{Concordance, ConcordanceLine},
    SearchHit,
};

/// Compressed sparse row matrix used for TF and TF-IDF
pub use utils::math::matrix::CsrMatrix;

pub use config::SearchConfig;
pub use error::{Error, Result, RowError};
