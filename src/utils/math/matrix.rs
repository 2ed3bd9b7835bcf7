use num::Num;

use crate::utils::{math::vector::SpRow, sort::sort_row_by_column};

/// Compressed sparse row matrix.
///
/// Row `r` owns the entries `indptr[r]..indptr[r + 1]` of `inds`/`vals`.
/// Within a row the column indices are strictly ascending and every stored
/// value is nonzero, so the stored-entry count of a column is its nonzero count.
#[derive(Debug, Clone, PartialEq)]
pub struct CsrMatrix<N> {
    rows: usize,
    cols: usize,
    indptr: Vec<usize>,
    inds: Vec<u32>,
    vals: Vec<N>,
}

impl<N> CsrMatrix<N>
where
    N: Num + Copy,
{
    pub fn zeros(rows: usize, cols: usize) -> Self {
        CsrMatrix {
            rows,
            cols,
            indptr: vec![0; rows + 1],
            inds: Vec::new(),
            vals: Vec::new(),
        }
    }

    /// Build from `(row, col, value)` triplets.
    ///
    /// Repeated `(row, col)` pairs are summed, not overwritten. Entries whose
    /// sum is zero are not stored. O(nnz) apart from the per-row radix sort.
    ///
    /// # Panics
    /// If a triplet lies outside `rows x cols`.
    pub fn from_triplets<I>(rows: usize, cols: usize, triplets: I) -> Self
    where
        I: IntoIterator<Item = (usize, usize, N)>,
    {
        assert!(cols <= u32::MAX as usize, "column count exceeds u32 index range");
        let triplets: Vec<(usize, usize, N)> = triplets.into_iter().collect();

        // bucket by row (counting sort, stable)
        let mut row_start = vec![0usize; rows + 1];
        for &(r, c, _) in &triplets {
            assert!(r < rows && c < cols, "triplet ({r}, {c}) out of bounds for {rows}x{cols}");
            row_start[r + 1] += 1;
        }
        for r in 0..rows {
            row_start[r + 1] += row_start[r];
        }
        let mut next = row_start.clone();
        let mut inds = vec![0u32; triplets.len()];
        let mut vals = vec![N::zero(); triplets.len()];
        for (r, c, v) in triplets {
            let pos = next[r];
            next[r] += 1;
            inds[pos] = c as u32;
            vals[pos] = v;
        }

        // order each row by column, then merge duplicates
        let mut indptr = Vec::with_capacity(rows + 1);
        indptr.push(0);
        let mut out_inds = Vec::with_capacity(inds.len());
        let mut out_vals = Vec::with_capacity(vals.len());
        for r in 0..rows {
            let (s, e) = (row_start[r], row_start[r + 1]);
            sort_row_by_column(&mut inds[s..e], &mut vals[s..e]);
            let mut k = s;
            while k < e {
                let col = inds[k];
                let mut sum = vals[k];
                k += 1;
                while k < e && inds[k] == col {
                    sum = sum + vals[k];
                    k += 1;
                }
                if sum != N::zero() {
                    out_inds.push(col);
                    out_vals.push(sum);
                }
            }
            indptr.push(out_inds.len());
        }

        CsrMatrix {
            rows,
            cols,
            indptr,
            inds: out_inds,
            vals: out_vals,
        }
    }

    /// (rows, cols)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// number of stored entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.vals.len()
    }

    #[inline]
    pub fn row(&self, r: usize) -> SpRow<'_, N> {
        let (s, e) = (self.indptr[r], self.indptr[r + 1]);
        SpRow::new(&self.inds[s..e], &self.vals[s..e], self.cols)
    }

    pub fn rows(&self) -> impl Iterator<Item = SpRow<'_, N>> + '_ {
        (0..self.rows).map(move |r| self.row(r))
    }

    /// Value at (r, c); zero when the entry is not stored or out of range.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> N {
        if r >= self.rows {
            return N::zero();
        }
        self.row(r).get(c)
    }

    pub fn row_sums(&self) -> Vec<N> {
        self.rows()
            .map(|row| row.values().iter().fold(N::zero(), |acc, &v| acc + v))
            .collect()
    }

    /// Number of nonzero entries per column, one pass over the stored entries.
    pub fn col_nnz(&self) -> Vec<usize> {
        let mut counts = vec![0usize; self.cols];
        for &c in &self.inds {
            counts[c as usize] += 1;
        }
        counts
    }

    /// Sum of every column, one pass over the stored entries.
    pub fn col_sums(&self) -> Vec<N> {
        let mut sums = vec![N::zero(); self.cols];
        for (&c, &v) in self.inds.iter().zip(self.vals.iter()) {
            sums[c as usize] = sums[c as usize] + v;
        }
        sums
    }
}

impl<N> CsrMatrix<N>
where
    N: Num + Copy + Into<f64>,
{
    /// Multiply column `j` by `factors[j]`.
    pub fn scale_columns(&self, factors: &[f64]) -> CsrMatrix<f64> {
        assert_eq!(factors.len(), self.cols, "one factor per column");
        self.map_entries(|_, c, v| v * factors[c])
    }

    /// Multiply row `i` by `factors[i]`.
    pub fn scale_rows(&self, factors: &[f64]) -> CsrMatrix<f64> {
        assert_eq!(factors.len(), self.rows, "one factor per row");
        self.map_entries(|r, _, v| v * factors[r])
    }

    fn map_entries<F>(&self, f: F) -> CsrMatrix<f64>
    where
        F: Fn(usize, usize, f64) -> f64,
    {
        let mut indptr = Vec::with_capacity(self.rows + 1);
        indptr.push(0);
        let mut inds = Vec::with_capacity(self.nnz());
        let mut vals = Vec::with_capacity(self.nnz());
        for r in 0..self.rows {
            for (c, v) in self.row(r).raw_iter() {
                let w = f(r, c, v.into());
                if w != 0.0 {
                    inds.push(c as u32);
                    vals.push(w);
                }
            }
            indptr.push(inds.len());
        }
        CsrMatrix {
            rows: self.rows,
            cols: self.cols,
            indptr,
            inds,
            vals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_triplets_accumulate() {
        let m = CsrMatrix::from_triplets(2, 3, vec![
            (0, 0, 1u32),
            (0, 1, 1),
            (0, 0, 1),
            (1, 1, 1),
            (1, 2, 1),
            (1, 2, 1),
            (1, 2, 1),
        ]);
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.nnz(), 4);
        assert_eq!(m.row(0).to_dense(), vec![2, 1, 0]);
        assert_eq!(m.row(1).to_dense(), vec![0, 1, 3]);
    }

    #[test]
    fn unordered_triplets_give_sorted_rows() {
        let triplets: Vec<(usize, usize, u32)> = (0..100).rev().map(|c| (0, c, 1)).collect();
        let m = CsrMatrix::from_triplets(1, 100, triplets);
        let inds = m.row(0).indices();
        assert!(inds.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(m.row_sums(), vec![100]);
    }

    #[test]
    fn column_statistics() {
        let m = CsrMatrix::from_triplets(3, 3, vec![(0, 0, 2u32), (1, 0, 1), (2, 2, 5), (1, 2, 1)]);
        assert_eq!(m.col_nnz(), vec![2, 0, 2]);
        assert_eq!(m.col_sums(), vec![3, 0, 6]);
        assert_eq!(m.get(2, 2), 5);
        assert_eq!(m.get(2, 1), 0);
        assert_eq!(m.get(7, 0), 0);
    }

    #[test]
    fn scaling_drops_zero_products() {
        let m = CsrMatrix::from_triplets(2, 2, vec![(0, 0, 2u32), (0, 1, 1), (1, 1, 3)]);
        let by_col = m.scale_columns(&[0.5, 0.0]);
        assert_eq!(by_col.nnz(), 1);
        assert_eq!(by_col.get(0, 0), 1.0);
        assert_eq!(by_col.get(1, 1), 0.0);

        let by_row = m.scale_rows(&[1.0, 2.0]);
        assert_eq!(by_row.get(0, 1), 1.0);
        assert_eq!(by_row.get(1, 1), 6.0);
    }

    #[test]
    fn empty_matrix() {
        let m = CsrMatrix::<u32>::from_triplets(0, 0, Vec::new());
        assert_eq!(m.shape(), (0, 0));
        assert!(m.col_nnz().is_empty());
        let z = CsrMatrix::<u32>::zeros(2, 4);
        assert_eq!(z.row(1).nnz(), 0);
        assert_eq!(z.row(1).dim(), 4);
    }

    #[test]
    fn sparse_row_products() {
        let m = CsrMatrix::from_triplets(2, 4, vec![(0, 0, 1u32), (0, 3, 2), (1, 3, 4), (1, 1, 1)]);
        assert_eq!(m.row(0).dot(&m.row(1)), 8.0);
        assert_eq!(m.row(0).dot_dense(&[1.0, 1.0, 1.0, 0.5]), 2.0);
        assert_eq!(m.row(1).norm_sq(), 17.0);
    }
}
