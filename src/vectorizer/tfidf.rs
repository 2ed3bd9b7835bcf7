use serde::Serialize;

use crate::{utils::math::matrix::CsrMatrix, vectorizer::vocab::Vocabulary};

/// Weighting strategy plugged into [`SearchEngine`](crate::SearchEngine).
pub trait TFIDFEngine: Send + Sync {
    /// Inverse document frequency of a term found in `df` of `doc_num` documents.
    fn idf(doc_num: u64, df: u64) -> f64;
}

/// Textbook weighting: `idf = ln(N / df)`, and 0 for a term that occurs in no document.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl TFIDFEngine for DefaultTFIDFEngine {
    #[inline]
    fn idf(doc_num: u64, df: u64) -> f64 {
        if df == 0 || doc_num == 0 {
            return 0.0;
        }
        (doc_num as f64 / df as f64).ln()
    }
}

/// IDF of every vocabulary term, indexed by term id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IDFVector {
    pub idf_vec: Vec<f64>,
    pub doc_num: u64,
}

impl IDFVector {
    /// Requires [`Vocabulary::update_stats`] to have run.
    pub fn from_vocabulary<E: TFIDFEngine>(vocab: &Vocabulary, doc_num: u64) -> Self {
        let mut idf_vec = vec![0.0; vocab.len()];
        for (_, stats) in vocab.iter() {
            idf_vec[stats.id] = E::idf(doc_num, stats.df);
        }
        IDFVector { idf_vec, doc_num }
    }

    #[inline]
    pub fn get(&self, id: usize) -> f64 {
        self.idf_vec.get(id).copied().unwrap_or(0.0)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.idf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf_vec.is_empty()
    }
}

/// `tfidf[i][j] = tf[i][j] * idf[j]`
pub fn tfidf_matrix(tf: &CsrMatrix<u32>, idf: &IDFVector) -> CsrMatrix<f64> {
    tf.scale_columns(&idf.idf_vec)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn idf_guards_zero_df() {
        assert_eq!(DefaultTFIDFEngine::idf(10, 0), 0.0);
        assert_eq!(DefaultTFIDFEngine::idf(0, 0), 0.0);
        assert_eq!(DefaultTFIDFEngine::idf(4, 4), 0.0);
        assert!((DefaultTFIDFEngine::idf(2, 1) - 2f64.ln()).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn idf_is_bounded_by_ln_n(n in 1u64..10_000, df_frac in 0.0f64..1.0) {
            let df = 1 + ((n - 1) as f64 * df_frac) as u64;
            let idf = DefaultTFIDFEngine::idf(n, df);
            prop_assert!(idf >= 0.0);
            prop_assert!(idf <= (n as f64).ln() + 1e-12);
            if df == n {
                prop_assert_eq!(idf, 0.0);
            }
        }
    }
}
