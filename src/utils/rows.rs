//! Row driver shared by the neighborhood filters.

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Calls `op(row, line, scratch)` for each of the first `rows` rows of `output`.
///
/// `line` is the row's `width` samples. Every worker owns a single scratch
/// vector with capacity `scratch_len` that is reused across the rows it handles.
#[cfg(feature = "rayon")]
pub(crate) fn for_each_row<F>(
    output: &mut [f64],
    width: usize,
    rows: usize,
    scratch_len: usize,
    op: F,
) where
    F: Fn(usize, &mut [f64], &mut Vec<f64>) + Send + Sync,
{
    output
        .par_chunks_exact_mut(width)
        .take(rows)
        .enumerate()
        .for_each_init(
            || Vec::with_capacity(scratch_len),
            |scratch, (row, line)| op(row, line, scratch),
        );
}

/// Calls `op(row, line, scratch)` for each of the first `rows` rows of `output`.
///
/// `line` is the row's `width` samples. One scratch vector with capacity
/// `scratch_len` is reused for the whole pass.
#[cfg(not(feature = "rayon"))]
pub(crate) fn for_each_row<F>(
    output: &mut [f64],
    width: usize,
    rows: usize,
    scratch_len: usize,
    op: F,
) where
    F: Fn(usize, &mut [f64], &mut Vec<f64>) + Send + Sync,
{
    let mut scratch = Vec::with_capacity(scratch_len);
    for (row, line) in output.chunks_exact_mut(width).take(rows).enumerate() {
        op(row, line, &mut scratch);
    }
}
