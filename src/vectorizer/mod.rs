pub mod evaluate;
pub mod tfidf;
pub mod token;
pub mod vocab;

use std::{marker::PhantomData, sync::Arc};

use tracing::debug;

use crate::{
    corpus::{document::Document, Corpus},
    utils::math::matrix::CsrMatrix,
    vectorizer::{
        tfidf::{tfidf_matrix, DefaultTFIDFEngine, IDFVector, TFIDFEngine},
        token::tokenize,
        vocab::Vocabulary,
    },
};

/// Ranked retrieval over a fixed set of documents.
///
/// An engine is a snapshot: it copies the document handles it is built from
/// and never looks back at the [`Corpus`]. Documents added to the corpus
/// later are invisible until a new engine is built.
///
/// Row `i` of every matrix belongs to `documents()[i]`; column `j` belongs to
/// the term with id `j` in [`vocabulary`](Self::vocabulary).
#[derive(Debug, Clone)]
pub struct SearchEngine<E = DefaultTFIDFEngine>
where
    E: TFIDFEngine,
{
    documents: Vec<Arc<Document>>,
    vocab: Vocabulary,
    tf: CsrMatrix<u32>,
    idf: IDFVector,
    tfidf: CsrMatrix<f64>,
    _marker: PhantomData<E>,
}

impl SearchEngine {
    /// Engine over every document currently in `corpus`, in insertion order.
    pub fn new(corpus: &Corpus) -> Self {
        Self::from_documents(corpus.documents().cloned().collect())
    }

    pub fn from_documents(documents: Vec<Arc<Document>>) -> Self {
        Self::build(documents)
    }
}

impl<E> SearchEngine<E>
where
    E: TFIDFEngine,
{
    /// Build with an explicit weighting engine.
    pub fn build(documents: Vec<Arc<Document>>) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(&d.text)).collect();

        let mut vocab = Vocabulary::from_tokenized(&tokenized);
        let tf = vocab.term_frequency_matrix(&tokenized);
        vocab.update_stats(&tf);
        let idf = IDFVector::from_vocabulary::<E>(&vocab, documents.len() as u64);
        let tfidf = tfidf_matrix(&tf, &idf);

        debug!(
            documents = documents.len(),
            terms = vocab.len(),
            nnz = tf.nnz(),
            "search engine built"
        );

        SearchEngine {
            documents,
            vocab,
            tf,
            idf,
            tfidf,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Raw occurrence counts, documents x terms.
    #[inline]
    pub fn tf_matrix(&self) -> &CsrMatrix<u32> {
        &self.tf
    }

    #[inline]
    pub fn tfidf_matrix(&self) -> &CsrMatrix<f64> {
        &self.tfidf
    }

    #[inline]
    pub fn idf_vector(&self) -> &IDFVector {
        &self.idf
    }

    /// IDF of `term`, or `None` if it is not in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.vocab.id(term).map(|id| self.idf.get(id))
    }

    #[inline]
    pub fn doc_num(&self) -> usize {
        self.documents.len()
    }

    #[inline]
    pub fn documents(&self) -> &[Arc<Document>] {
        &self.documents
    }

    /// The `n` most frequent terms in the snapshot.
    pub fn most_frequent(&self, n: usize) -> Vec<(&str, u64)> {
        self.vocab
            .most_frequent(n)
            .into_iter()
            .map(|(term, stats)| (term, stats.total_freq))
            .collect()
    }
}
