/// Rows up to this many entries are ordered in place.
const SMALL_ROW: usize = 32;

/// Order the entries of one sparse row by column, carrying each value along.
///
/// Entries with the same column keep their input order, which is what lets
/// [`CsrMatrix::from_triplets`](crate::utils::math::matrix::CsrMatrix::from_triplets)
/// merge duplicates deterministically. Long rows use a byte-wise LSD radix
/// sort (four counting passes over the `u32` column); short rows use
/// insertion sort.
pub fn sort_row_by_column<N: Copy>(cols: &mut [u32], vals: &mut [N]) {
    assert_eq!(cols.len(), vals.len());
    match cols.len() {
        0 | 1 => {}
        n if n <= SMALL_ROW => insertion_sort(cols, vals),
        _ => radix_sort(cols, vals),
    }
}

fn insertion_sort<N: Copy>(cols: &mut [u32], vals: &mut [N]) {
    for i in 1..cols.len() {
        let mut j = i;
        while j > 0 && cols[j - 1] > cols[j] {
            cols.swap(j - 1, j);
            vals.swap(j - 1, j);
            j -= 1;
        }
    }
}

fn radix_sort<N: Copy>(cols: &mut [u32], vals: &mut [N]) {
    let mut cols_buf = cols.to_vec();
    let mut vals_buf = vals.to_vec();

    // even number of passes: the result ends up back in `cols`/`vals`
    for (pass, shift) in [0u32, 8, 16, 24].into_iter().enumerate() {
        if pass % 2 == 0 {
            scatter(cols, vals, &mut cols_buf, &mut vals_buf, shift);
        } else {
            scatter(&cols_buf, &vals_buf, cols, vals, shift);
        }
    }
}

/// One stable counting pass on the byte of each column at `shift`.
fn scatter<N: Copy>(cols: &[u32], vals: &[N], out_cols: &mut [u32], out_vals: &mut [N], shift: u32) {
    let digit = |c: u32| ((c >> shift) & 0xFF) as usize;

    let mut next = [0usize; 256];
    for &c in cols {
        next[digit(c)] += 1;
    }
    let mut offset = 0;
    for slot in next.iter_mut() {
        let count = *slot;
        *slot = offset;
        offset += count;
    }

    for (&c, &v) in cols.iter().zip(vals) {
        let pos = &mut next[digit(c)];
        out_cols[*pos] = c;
        out_vals[*pos] = v;
        *pos += 1;
    }
}
