//! Row/column tiling with a full dot product per element.

use crate::blocked::for_each_row_block;
use crate::blocked::tile::tile_ranges;
use crate::matrix::dims::Dims;
use crate::matrix::element::Element;
use std::ops::Range;

/// Tiled matrix multiplication, eager accumulation: C = A * B.
///
/// The (m, n) output plane is cut into `tile × tile` blocks. Inside a
/// block every element gets its whole k-length dot product computed in a
/// register and stored once, same as the reference kernel but restricted
/// to the block. Keeping the (i, j) sweep inside a tile means neighbouring
/// rows reuse the same columns of B while they're still cached. A's row
/// and B's column are still re-read in full for every element though.
///
/// # Arguments
///
/// * `a` - Matrix A (m × k), row-major
/// * `b` - Matrix B (k × n), row-major
/// * `c` - Matrix C (m × n), row-major, overwritten
/// * `tile` - Tile edge length (clamped at the matrix edges)
///
/// # Panics
///
/// Panics if the slice sizes don't match `dims` or `tile` is zero.
pub fn matmul_tiled_eager<T: Element>(a: &[T], b: &[T], c: &mut [T], dims: Dims, tile: usize) {
    dims.assert_operands(a, b, c);
    for_each_row_block(c, dims, tile, |rows, stripe| {
        eager_row_block(a, b, stripe, dims, rows, tile)
    });
}

/// Computes one row stripe: every column tile of the rows in `rows`.
///
/// `stripe` holds exactly those rows of C.
pub fn eager_row_block<T: Element>(
    a: &[T],
    b: &[T],
    stripe: &mut [T],
    dims: Dims,
    rows: Range<usize>,
    tile: usize,
) {
    for cols in tile_ranges(dims.n, tile) {
        eager_tile_block(a, b, stripe, dims, &rows, cols);
    }
}

#[inline]
fn eager_tile_block<T: Element>(
    a: &[T],
    b: &[T],
    stripe: &mut [T],
    dims: Dims,
    rows: &Range<usize>,
    cols: Range<usize>,
) {
    let Dims { k, n, .. } = dims;

    for ii in rows.clone() {
        let a_row = &a[ii * k..(ii + 1) * k];
        let c_row = (ii - rows.start) * n;

        for jj in cols.clone() {
            let mut acc = T::zero();
            for (z, &a_iz) in a_row.iter().enumerate() {
                acc = acc.mul_add_wrapping(a_iz, b[z * n + jj]);
            }
            stripe[c_row + jj] = acc;
        }
    }
}
