use crate::vectorizer::{tfidf::TFIDFEngine, token::tokenize, SearchEngine};

/// Dense query vector in the engine's vocabulary space.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryVector {
    values: Vec<f64>,
}

impl QueryVector {
    pub fn zeros(dim: usize) -> Self {
        QueryVector {
            values: vec![0.0; dim],
        }
    }

    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn dim(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn get(&self, id: usize) -> f64 {
        self.values.get(id).copied().unwrap_or(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }

    pub fn is_zero(&self) -> bool {
        self.values.iter().all(|&v| v == 0.0)
    }
}

impl<E: TFIDFEngine> SearchEngine<E> {
    /// Map a query string into the vocabulary space.
    ///
    /// Every occurrence of a known term adds that term's idf once more, so a
    /// term repeated `k` times weighs `k * idf`. Unknown terms are ignored.
    pub fn query_vector(&self, query: &str) -> QueryVector {
        let mut vec = QueryVector::zeros(self.vocabulary().len());
        for token in tokenize(query) {
            if let Some(id) = self.vocabulary().id(&token) {
                vec.values[id] += self.idf_vector().get(id);
            }
        }
        vec
    }
}
