//! Tile index ranges.
//!
//! A tile is nothing but a clamped `Range<usize>` along one dimension. No
//! data is ever copied into tile-local buffers; the ranges just bound the
//! loops in the kernels.

use crate::matrix::dims::Dims;
use std::ops::Range;

/// Splits `0..bound` into consecutive ranges of length `edge`.
///
/// The last range is clamped to `bound`, so `bound` doesn't need to be a
/// multiple of `edge`: `tile_ranges(1200, 32)` ends with `1184..1200`.
///
/// # Panics
///
/// Panics if `edge` is zero.
pub fn tile_ranges(bound: usize, edge: usize) -> impl Iterator<Item = Range<usize>> {
    assert!(edge > 0, "tile edge length must be at least 1");
    (0..bound)
        .step_by(edge)
        .map(move |start| start..start.saturating_add(edge).min(bound))
}

/// One block of the output plane: a row tile crossed with a column tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBlock {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

impl TileBlock {
    /// Number of output elements covered.
    pub fn len(&self) -> usize {
        self.rows.len() * self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Enumerates every tile-block of the m×n output, in row-major order.
pub fn tile_blocks(dims: Dims, edge: usize) -> Vec<TileBlock> {
    tile_ranges(dims.m, edge)
        .flat_map(|rows| {
            tile_ranges(dims.n, edge).map(move |cols| TileBlock {
                rows: rows.clone(),
                cols,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_tile_is_clamped() {
        let tiles: Vec<_> = tile_ranges(1200, 32).collect();
        assert_eq!(tiles.len(), 38);
        assert_eq!(tiles[0], 0..32);
        assert_eq!(*tiles.last().unwrap(), 1184..1200);
        assert_eq!(tiles.last().unwrap().len(), 16);
    }

    #[test]
    fn test_exact_multiple_has_no_short_tile() {
        let tiles: Vec<_> = tile_ranges(64, 32).collect();
        assert_eq!(tiles, vec![0..32, 32..64]);
    }

    #[test]
    fn test_edge_larger_than_bound() {
        let tiles: Vec<_> = tile_ranges(3, 32).collect();
        assert_eq!(tiles, vec![0..3]);
        assert_eq!(tile_ranges(0, 32).count(), 0);
    }

    #[test]
    fn test_huge_edge_does_not_overflow() {
        assert_eq!(tile_ranges(5, usize::MAX).collect::<Vec<_>>(), vec![0..5]);

        let half = usize::MAX / 2 + 1;
        let tiles: Vec<_> = tile_ranges(usize::MAX, half).collect();
        assert_eq!(tiles, vec![0..half, half..usize::MAX]);
    }

    #[test]
    fn test_tiles_cover_every_index_once() {
        for bound in [1, 7, 31, 32, 33, 100] {
            for edge in [1, 3, 8, 32] {
                let covered: Vec<usize> = tile_ranges(bound, edge).flatten().collect();
                assert_eq!(covered, (0..bound).collect::<Vec<_>>(), "{bound}/{edge}");
            }
        }
    }

    #[test]
    fn test_tile_blocks_partition_output() {
        let dims = Dims::new(5, 9, 7);
        let blocks = tile_blocks(dims, 3);

        // 2 row tiles × 3 column tiles
        assert_eq!(blocks.len(), 6);
        assert_eq!(blocks.iter().map(TileBlock::len).sum::<usize>(), 35);
        assert_eq!(
            blocks[5],
            TileBlock {
                rows: 3..5,
                cols: 6..7
            }
        );
    }

    #[test]
    #[should_panic(expected = "tile edge length must be at least 1")]
    fn test_zero_edge_panics() {
        let _ = tile_ranges(10, 0).count();
    }
}
