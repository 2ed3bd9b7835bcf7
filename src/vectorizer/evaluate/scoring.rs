use std::{cmp::Ordering, fmt::Debug};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    utils::math::vector::SpRow,
    vectorizer::{evaluate::query::QueryVector, tfidf::TFIDFEngine, SearchEngine},
};

/// Score of one document, identified by its row in the engine snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HitEntry {
    pub doc_index: usize,
    pub score: f64,
}

/// Structure to store search results
#[derive(Clone, PartialEq)]
pub struct Hits {
    pub list: Vec<HitEntry>,
}

impl Hits {
    pub fn new(list: Vec<HitEntry>) -> Self {
        Hits { list }
    }

    /// Sort by descending score; equal scores keep ascending document order.
    pub fn sort_by_score(&mut self) -> &mut Self {
        self.list.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then(a.doc_index.cmp(&b.doc_index))
        });
        self
    }

    pub fn truncate(&mut self, k: usize) -> &mut Self {
        self.list.truncate(k);
        self
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl Debug for Hits {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            // one hit per line
            writeln!(f, "Hits [")?;
            for hit in &self.list {
                writeln!(f, "    #{}: {:.6}", hit.doc_index, hit.score)?;
            }
            write!(f, "]")
        } else {
            f.debug_list().entries(&self.list).finish()
        }
    }
}

/// One ranked result with the metadata of its document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDocument {
    pub score: f64,
    pub doc_index: usize,
    pub title: String,
    pub author: String,
    pub date: String,
    pub url: String,
}

/// cosθ = A・B / (|A||B|), 0 when either vector is zero.
#[inline]
pub fn cosine(query: &QueryVector, query_norm: f64, doc: &SpRow<'_, f64>) -> f64 {
    let doc_norm = doc.norm();
    if query_norm == 0.0 || doc_norm == 0.0 {
        return 0.0;
    }
    // rounding can push a perfect match just past 1
    (doc.dot_dense(query.values()) / (query_norm * doc_norm)).clamp(0.0, 1.0)
}

impl<E: TFIDFEngine> SearchEngine<E> {
    /// Cosine similarity of every document, in document order.
    pub fn scores(&self, query: &QueryVector) -> Hits {
        debug_assert_eq!(query.dim(), self.vocabulary().len());
        let query_norm = query.norm();
        let matrix = self.tfidf_matrix();
        let score_row = |doc_index: usize| HitEntry {
            doc_index,
            score: cosine(query, query_norm, &matrix.row(doc_index)),
        };

        #[cfg(feature = "parallel")]
        let list: Vec<HitEntry> = (0..self.doc_num()).into_par_iter().map(score_row).collect();
        #[cfg(not(feature = "parallel"))]
        let list: Vec<HitEntry> = (0..self.doc_num()).map(score_row).collect();

        Hits::new(list)
    }

    /// Top `k` documents for an already built query vector.
    pub fn rank_vector(&self, query: &QueryVector, k: usize) -> Vec<RankedDocument> {
        let mut hits = self.scores(query);
        hits.sort_by_score().truncate(k);
        hits.list
            .into_iter()
            .map(|hit| {
                let doc = &self.documents()[hit.doc_index];
                RankedDocument {
                    score: hit.score,
                    doc_index: hit.doc_index,
                    title: doc.title.clone(),
                    author: doc.author.clone(),
                    date: doc.date.clone(),
                    url: doc.url.clone(),
                }
            })
            .collect()
    }

    /// Top `k` documents for `query`, best first, ties in document order.
    /// Returns every document when `k` exceeds the document count.
    pub fn rank(&self, query: &str, k: usize) -> Vec<RankedDocument> {
        let query = self.query_vector(query);
        self.rank_vector(&query, k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_break_by_document_order() {
        let mut hits = Hits::new(vec![
            HitEntry { doc_index: 3, score: 0.5 },
            HitEntry { doc_index: 0, score: 0.1 },
            HitEntry { doc_index: 1, score: 0.5 },
            HitEntry { doc_index: 2, score: 0.9 },
            HitEntry { doc_index: 4, score: 0.0 },
            HitEntry { doc_index: 5, score: -0.0 },
        ]);
        hits.sort_by_score();
        let order: Vec<usize> = hits.list.iter().map(|h| h.doc_index).collect();
        assert_eq!(order, vec![2, 1, 3, 0, 4, 5]);
        hits.truncate(2);
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn alternate_debug_lists_one_hit_per_line() {
        let hits = Hits::new(vec![HitEntry { doc_index: 1, score: 0.25 }]);
        assert_eq!(format!("{:#?}", hits), "Hits [\n    #1: 0.250000\n]");
    }
}
