//! Row/column tiling with the output tile kept resident across the
//! reduction.

use crate::blocked::tile::tile_ranges;
use crate::blocked::{for_each_row_block, zero_tile};
use crate::matrix::dims::Dims;
use crate::matrix::element::Element;
use std::ops::Range;

/// Tiled matrix multiplication, streaming accumulation: C = A * B.
///
/// Same (m, n) blocking as [`matmul_tiled_eager`], but the loop nest is
/// turned inside out. Each output tile is zeroed first, then z walks the
/// whole reduction dimension *outside* the (i, j) loops, adding
/// `A[i][z] * B[z][j]` into the tile for every z.
///
/// For a fixed z the inner loop reads one contiguous run of B's row z and
/// one scalar of A, and updates one contiguous run of C. The C tile is
/// written k times instead of once, but it stays hot the whole time and
/// both A and B are read sequentially.
///
/// [`matmul_tiled_eager`]: crate::blocked::tiled_eager::matmul_tiled_eager
///
/// # Panics
///
/// Panics if the slice sizes don't match `dims` or `tile` is zero.
pub fn matmul_tiled_stream<T: Element>(a: &[T], b: &[T], c: &mut [T], dims: Dims, tile: usize) {
    dims.assert_operands(a, b, c);
    for_each_row_block(c, dims, tile, |rows, stripe| {
        stream_row_block(a, b, stripe, dims, rows, tile)
    });
}

/// Computes one row stripe: every column tile of the rows in `rows`.
pub fn stream_row_block<T: Element>(
    a: &[T],
    b: &[T],
    stripe: &mut [T],
    dims: Dims,
    rows: Range<usize>,
    tile: usize,
) {
    for cols in tile_ranges(dims.n, tile) {
        stream_tile_block(a, b, stripe, dims, &rows, cols);
    }
}

#[inline]
fn stream_tile_block<T: Element>(
    a: &[T],
    b: &[T],
    stripe: &mut [T],
    dims: Dims,
    rows: &Range<usize>,
    cols: Range<usize>,
) {
    let Dims { k, n, .. } = dims;

    // Phase 1: zero the tile
    zero_tile(stripe, n, rows, &cols);

    // Phase 2: one pass over z, sweeping the whole tile each time
    for z in 0..k {
        let b_run = &b[z * n + cols.start..z * n + cols.end];

        for ii in rows.clone() {
            let a_iz = a[ii * k + z];
            let c_row = (ii - rows.start) * n;
            let c_run = &mut stripe[c_row + cols.start..c_row + cols.end];

            for (c_ij, &b_zj) in c_run.iter_mut().zip(b_run) {
                *c_ij = c_ij.mul_add_wrapping(a_iz, b_zj);
            }
        }
    }
}
