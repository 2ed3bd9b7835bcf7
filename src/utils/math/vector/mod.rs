pub mod math;

use num::Num;

/// SpRow is a borrowed view of one row of a [`CsrMatrix`](crate::utils::math::matrix::CsrMatrix).
///
/// Only the nonzero entries are stored: `inds` holds the column index of each
/// entry and `vals` its value. Indices are strictly ascending.
#[derive(Debug, Clone, Copy)]
pub struct SpRow<'a, N> {
    inds: &'a [u32],
    vals: &'a [N],
    dim: usize,
}

impl<'a, N> SpRow<'a, N>
where
    N: Num + Copy,
{
    #[inline]
    pub(crate) fn new(inds: &'a [u32], vals: &'a [N], dim: usize) -> Self {
        debug_assert_eq!(inds.len(), vals.len());
        SpRow { inds, vals, dim }
    }

    /// logical length (number of columns of the matrix)
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn indices(&self) -> &'a [u32] {
        self.inds
    }

    #[inline]
    pub fn values(&self) -> &'a [N] {
        self.vals
    }

    /// Value at `index`, zero when the entry is not stored.
    #[inline]
    pub fn get(&self, index: usize) -> N {
        if index >= self.dim {
            return N::zero();
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => self.vals[pos],
            Err(_) => N::zero(),
        }
    }

    /// (index, value) pairs of the stored entries, ascending by index
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, N)> + 'a {
        self.inds
            .iter()
            .zip(self.vals.iter())
            .map(|(&i, &v)| (i as usize, v))
    }

    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.dim];
        for (i, v) in self.raw_iter() {
            dense[i] = v;
        }
        dense
    }
}
