use std::cmp::Ordering;

use num::Num;

use super::SpRow;

impl<'a, N> SpRow<'a, N>
where
    N: Num + Copy + Into<f64>,
{
    /// Dot product against a dense vector.
    /// Only the stored entries are visited, so this is O(nnz).
    #[inline]
    pub fn dot_dense(&self, dense: &[f64]) -> f64 {
        debug_assert_eq!(
            self.dim(),
            dense.len(),
            "Vectors must be of the same length to compute dot product."
        );
        self.raw_iter()
            .map(|(i, v)| {
                let w: f64 = v.into();
                w * dense.get(i).copied().unwrap_or(0.0)
            })
            .sum()
    }

    /// Dot product of two sparse rows (merge join over the index lists).
    #[inline]
    pub fn dot(&self, other: &SpRow<'_, N>) -> f64 {
        debug_assert_eq!(
            self.dim(),
            other.dim(),
            "Vectors must be of the same length to compute dot product."
        );
        let (a_inds, a_vals) = (self.indices(), self.values());
        let (b_inds, b_vals) = (other.indices(), other.values());
        let mut result = 0.0;
        let mut i = 0;
        let mut j = 0;
        while i < a_inds.len() && j < b_inds.len() {
            match a_inds[i].cmp(&b_inds[j]) {
                Ordering::Equal => {
                    let a: f64 = a_vals[i].into();
                    let b: f64 = b_vals[j].into();
                    result += a * b;
                    i += 1;
                    j += 1;
                }
                Ordering::Less => i += 1,
                Ordering::Greater => j += 1,
            }
        }
        result
    }

    #[inline]
    pub fn norm_sq(&self) -> f64 {
        self.values()
            .iter()
            .map(|&v| {
                let v: f64 = v.into();
                v * v
            })
            .sum()
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }
}
