use indexmap::IndexMap;
use serde::Serialize;

use crate::{utils::math::matrix::CsrMatrix, vectorizer::token::tokenize};

/// Per-term statistics. `total_freq` and `df` stay 0 until
/// [`Vocabulary::update_stats`] has seen the term-frequency matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermStats {
    /// dense column id, in order of first appearance
    pub id: usize,
    /// occurrences across the whole corpus
    pub total_freq: u64,
    /// number of documents containing the term
    pub df: u64,
}

/// Term -> [`TermStats`], iterated in id order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Vocabulary {
    #[serde(with = "indexmap::map::serde_seq")]
    terms: IndexMap<String, TermStats>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Vocabulary {
            terms: IndexMap::new(),
        }
    }

    /// Assign ids to the terms of `texts`, scanning texts in order and
    /// tokens left to right.
    pub fn build<'a, I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut vocab = Self::new();
        for text in texts {
            for token in tokenize(text) {
                vocab.insert(token);
            }
        }
        vocab
    }

    /// Same as [`build`](Self::build) for already tokenized documents.
    pub fn from_tokenized(docs: &[Vec<String>]) -> Self {
        let mut vocab = Self::new();
        for token in docs.iter().flatten() {
            vocab.insert(token.clone());
        }
        vocab
    }

    /// Id of `token`, assigning the next free id if it is new.
    pub fn insert(&mut self, token: String) -> usize {
        let next_id = self.terms.len();
        self.terms
            .entry(token)
            .or_insert(TermStats {
                id: next_id,
                total_freq: 0,
                df: 0,
            })
            .id
    }

    #[inline]
    pub fn id(&self, token: &str) -> Option<usize> {
        self.terms.get(token).map(|s| s.id)
    }

    #[inline]
    pub fn get(&self, token: &str) -> Option<&TermStats> {
        self.terms.get(token)
    }

    /// Term with the given id.
    #[inline]
    pub fn term(&self, id: usize) -> Option<&str> {
        self.terms.get_index(id).map(|(t, _)| t.as_str())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TermStats)> + '_ {
        self.terms.iter().map(|(t, s)| (t.as_str(), s))
    }

    /// Documents x vocabulary matrix of raw occurrence counts.
    /// Tokens missing from the vocabulary are ignored.
    pub fn term_frequency_matrix(&self, docs: &[Vec<String>]) -> CsrMatrix<u32> {
        let triplets = docs.iter().enumerate().flat_map(|(row, tokens)| {
            tokens
                .iter()
                .filter_map(move |token| self.id(token).map(|col| (row, col, 1u32)))
        });
        CsrMatrix::from_triplets(docs.len(), self.len(), triplets)
    }

    /// Fill `df` and `total_freq` from a term-frequency matrix whose columns
    /// are this vocabulary's ids.
    pub fn update_stats(&mut self, tf: &CsrMatrix<u32>) {
        debug_assert_eq!(tf.shape().1, self.len());
        let df = tf.col_nnz();
        let totals = tf.col_sums();
        for stats in self.terms.values_mut() {
            stats.df = df.get(stats.id).copied().unwrap_or(0) as u64;
            stats.total_freq = totals.get(stats.id).copied().unwrap_or(0) as u64;
        }
    }

    /// The `n` terms with the highest corpus-wide frequency, ties by id.
    pub fn most_frequent(&self, n: usize) -> Vec<(&str, TermStats)> {
        let mut terms: Vec<(&str, TermStats)> = self.terms.iter().map(|(t, s)| (t.as_str(), *s)).collect();
        terms.sort_by(|a, b| b.1.total_freq.cmp(&a.1.total_freq).then(a.1.id.cmp(&b.1.id)));
        terms.truncate(n);
        terms
    }
}
