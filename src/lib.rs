//! Cache-tiled integer matrix multiplication, checked against a naive
//! reference.
//!
//! I built this to see how much of matmul performance is just loop order.
//! Turns out a lot: the same O(m·k·n) multiply-adds get much faster once
//! the loops are cut into tiles that fit in L1 and the tiles are spread
//! over threads. Arithmetic is exact and wraps on overflow, so every
//! kernel must agree with the reference bit for bit.
//!
//! ## Usage
//!
//! ```
//! use mmult::{Dims, Variant, WorkerPool, matmul_naive_ijk, multiply};
//!
//! let dims = Dims::new(2, 3, 2);
//! let a = vec![1, 2, 3, 4, 5, 6];
//! let b = vec![7, 8, 9, 10, 11, 12];
//! let mut c = vec![0i32; 4];
//!
//! let pool = WorkerPool::new(2).unwrap();
//! multiply(Variant::Tiled3d, &a, &b, &mut c, dims, 32, &pool).unwrap();
//! assert_eq!(c, vec![58, 64, 139, 154]);
//!
//! let mut reference = vec![0i32; 4];
//! matmul_naive_ijk(&a, &b, &mut reference, dims);
//! assert_eq!(c, reference);
//! ```
//!
//! ## What's inside
//!
//! - Naive i-j-k reference kernel
//! - Tiled kernel with eager (per-element) accumulation
//! - Tiled kernel that keeps the output tile resident while z streams by
//! - Fully blocked kernel tiling rows, columns and the reduction dimension
//! - A rayon worker pool handing out disjoint row stripes of the output
//! - A verifier that pins down the first mismatching element

pub mod blocked;
pub mod config;
pub mod error;
pub mod matrix;
pub mod threaded;
pub mod variant;
pub mod verify;

pub use blocked::tiled_3d::matmul_tiled_3d;
pub use blocked::tiled_eager::matmul_tiled_eager;
pub use blocked::tiled_stream::matmul_tiled_stream;
pub use error::{MatmulError, Result};
pub use matrix::naive_ijk::matmul_naive_ijk;
pub use matrix::{Dims, Element, Matrix};
pub use threaded::WorkerPool;
pub use threaded::tiled_mt::{matmul_tiled_3d_mt, matmul_tiled_eager_mt, matmul_tiled_stream_mt};
pub use variant::Variant;
pub use verify::{VerifyError, assert_verified, verify};

/// Matrix multiply with the chosen tiled kernel: C = A * B.
///
/// Checks shapes and tile size up front and returns an error instead of
/// panicking, then runs `variant` across `pool`. Matrices are row-major:
/// A is m×k, B is k×n, C is m×n. C is fully overwritten.
pub fn multiply<T: Element>(
    variant: Variant,
    a: &[T],
    b: &[T],
    c: &mut [T],
    dims: Dims,
    tile: usize,
    pool: &WorkerPool,
) -> Result<()> {
    dims.validate(a, b, c, tile)?;

    if log::log_enabled!(log::Level::Debug) {
        log::debug!(
            "{} on {}: {} tile-blocks of edge {} across {} threads",
            variant.name(),
            dims,
            blocked::tile::tile_blocks(dims, tile).len(),
            tile,
            pool.num_threads()
        );
    }

    match variant {
        Variant::TiledEager => matmul_tiled_eager_mt(a, b, c, dims, tile, pool),
        Variant::TiledStream => matmul_tiled_stream_mt(a, b, c, dims, tile, pool),
        Variant::Tiled3d => matmul_tiled_3d_mt(a, b, c, dims, tile, pool),
    }
    Ok(())
}
