//! Multi-threaded tiled kernels.

use crate::blocked::tiled_3d::blocked_row_block;
use crate::blocked::tiled_eager::eager_row_block;
use crate::blocked::tiled_stream::stream_row_block;
use crate::matrix::dims::Dims;
use crate::matrix::element::Element;
use crate::threaded::pool::WorkerPool;

/// Multi-threaded [`matmul_tiled_eager`](crate::blocked::tiled_eager::matmul_tiled_eager).
///
/// Row stripes are spread over `pool`'s workers; returns once all are done.
///
/// # Panics
///
/// Panics if the slice sizes don't match `dims` or `tile` is zero.
pub fn matmul_tiled_eager_mt<T: Element>(
    a: &[T],
    b: &[T],
    c: &mut [T],
    dims: Dims,
    tile: usize,
    pool: &WorkerPool,
) {
    dims.assert_operands(a, b, c);
    pool.run_row_blocks(c, dims, tile, |rows, stripe| {
        eager_row_block(a, b, stripe, dims, rows, tile)
    });
}

/// Multi-threaded [`matmul_tiled_stream`](crate::blocked::tiled_stream::matmul_tiled_stream).
///
/// # Panics
///
/// Panics if the slice sizes don't match `dims` or `tile` is zero.
pub fn matmul_tiled_stream_mt<T: Element>(
    a: &[T],
    b: &[T],
    c: &mut [T],
    dims: Dims,
    tile: usize,
    pool: &WorkerPool,
) {
    dims.assert_operands(a, b, c);
    pool.run_row_blocks(c, dims, tile, |rows, stripe| {
        stream_row_block(a, b, stripe, dims, rows, tile)
    });
}

/// Multi-threaded [`matmul_tiled_3d`](crate::blocked::tiled_3d::matmul_tiled_3d).
///
/// # Panics
///
/// Panics if the slice sizes don't match `dims` or `tile` is zero.
pub fn matmul_tiled_3d_mt<T: Element>(
    a: &[T],
    b: &[T],
    c: &mut [T],
    dims: Dims,
    tile: usize,
    pool: &WorkerPool,
) {
    dims.assert_operands(a, b, c);
    pool.run_row_blocks(c, dims, tile, |rows, stripe| {
        blocked_row_block(a, b, stripe, dims, rows, tile)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::naive_ijk::matmul_naive_ijk;

    type MtKernel = fn(&[i32], &[i32], &mut [i32], Dims, usize, &WorkerPool);

    const KERNELS: [(&str, MtKernel); 3] = [
        ("eager", matmul_tiled_eager_mt),
        ("stream", matmul_tiled_stream_mt),
        ("3d", matmul_tiled_3d_mt),
    ];

    #[test]
    fn test_mt_kernels_match_naive() {
        let pool = WorkerPool::new(4).unwrap();
        let dims = Dims::new(130, 47, 99);

        let a: Vec<i32> = (0..dims.a_len()).map(|i| (i % 17) as i32 - 8).collect();
        let b: Vec<i32> = (0..dims.b_len()).map(|i| (i % 13) as i32 - 6).collect();

        let mut c_naive = vec![0; dims.c_len()];
        matmul_naive_ijk(&a, &b, &mut c_naive, dims);

        for (name, kernel) in KERNELS {
            let mut c_mt = vec![i32::MIN; dims.c_len()];
            kernel(&a, &b, &mut c_mt, dims, 32, &pool);
            assert_eq!(c_naive, c_mt, "{name}");
        }
    }

    #[test]
    fn test_mt_kernels_on_single_worker() {
        let pool = WorkerPool::new(1).unwrap();
        let dims = Dims::new(9, 4, 11);

        let a: Vec<i32> = (0..dims.a_len()).map(|i| i as i32).collect();
        let b: Vec<i32> = (0..dims.b_len()).map(|i| 3 - i as i32).collect();

        let mut c_naive = vec![0; dims.c_len()];
        matmul_naive_ijk(&a, &b, &mut c_naive, dims);

        for (name, kernel) in KERNELS {
            let mut c_mt = vec![0; dims.c_len()];
            kernel(&a, &b, &mut c_mt, dims, 4, &pool);
            assert_eq!(c_naive, c_mt, "{name}");
        }
    }

    #[test]
    #[should_panic(expected = "A: expected")]
    fn test_mt_rejects_wrong_sizes() {
        let pool = WorkerPool::new(1).unwrap();
        let mut c = vec![0i32; 4];
        matmul_tiled_3d_mt(&[1, 2, 3], &[1, 2, 3, 4], &mut c, Dims::new(2, 2, 2), 2, &pool);
    }
}
