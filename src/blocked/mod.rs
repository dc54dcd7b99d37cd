//! Cache-tiled kernels.
//!
//! Each kernel splits the m×n output into square tiles of edge `tile` and
//! finishes one tile-block before moving on to the next, so the slices of
//! A, B and C it touches stay in cache. They differ in how they walk the
//! reduction dimension:
//!
//! - `tiled_eager`: full k-length dot product per output element
//! - `tiled_stream`: zero the tile, then stream z outside the (i, j) loops
//! - `tiled_3d`: also tile z, so A, B and C tiles are all hot at once
//!
//! The functions here are single-threaded. They process the output one
//! row stripe (a row tile with all its column tiles) at a time, which is
//! the same unit of work the threaded versions hand to workers.

pub mod tile;
pub mod tiled_3d;
pub mod tiled_eager;
pub mod tiled_stream;

use crate::matrix::dims::Dims;
use crate::matrix::element::Element;
use std::ops::Range;
use tile::tile_ranges;

/// Runs `f` over every row stripe of `c`, in order.
///
/// `f` gets the global row range of the stripe and the stripe itself,
/// `rows.len() * n` elements starting at row `rows.start`.
pub fn for_each_row_block<T, F>(c: &mut [T], dims: Dims, tile: usize, mut f: F)
where
    F: FnMut(Range<usize>, &mut [T]),
{
    assert!(tile > 0, "tile edge length must be at least 1");
    if c.is_empty() {
        return;
    }

    for (rows, stripe) in tile_ranges(dims.m, tile).zip(c.chunks_mut(stripe_len(dims, tile))) {
        f(rows, stripe);
    }
}

/// Elements in a full row stripe. The row count is clamped to m, so any
/// tile edge works as long as `c` holds m×n elements.
#[inline]
pub(crate) fn stripe_len(dims: Dims, tile: usize) -> usize {
    tile.min(dims.m) * dims.n
}

/// Zeroes the (rows × cols) block of a row stripe whose first row is
/// `rows.start`.
#[inline]
pub(crate) fn zero_tile<T: Element>(
    stripe: &mut [T],
    n: usize,
    rows: &Range<usize>,
    cols: &Range<usize>,
) {
    for local in 0..rows.len() {
        let row = local * n;
        stripe[row + cols.start..row + cols.end].fill(T::zero());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_blocks_are_disjoint_and_cover_output() {
        let dims = Dims::new(7, 1, 3);
        let mut c = vec![0i32; dims.c_len()];
        let mut seen = Vec::new();

        for_each_row_block(&mut c, dims, 3, |rows, stripe| {
            assert_eq!(stripe.len(), rows.len() * dims.n);
            stripe.fill(rows.start as i32 + 1);
            seen.push(rows);
        });

        assert_eq!(seen, vec![0..3, 3..6, 6..7]);
        assert_eq!(&c[..9], &[1; 9]);
        assert_eq!(&c[18..], &[7; 3]);
    }

    #[test]
    fn test_huge_tile_covers_output_in_one_stripe() {
        let dims = Dims::new(4, 1, 2);
        let mut c = vec![0i32; dims.c_len()];
        let mut seen = Vec::new();

        for_each_row_block(&mut c, dims, usize::MAX, |rows, stripe| {
            stripe.fill(1);
            seen.push(rows);
        });

        assert_eq!(seen, vec![0..4]);
        assert_eq!(c, vec![1; 8]);
    }

    #[test]
    fn test_zero_tile_only_touches_its_columns() {
        let mut stripe = vec![5i32; 2 * 4];
        zero_tile(&mut stripe, 4, &(10..12), &(1..3));
        assert_eq!(stripe, vec![5, 0, 0, 5, 5, 0, 0, 5]);
    }
}
