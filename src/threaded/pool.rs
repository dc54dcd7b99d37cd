//! Worker pool that runs row stripes in parallel.

use crate::blocked::stripe_len;
use crate::blocked::tile::tile_ranges;
use crate::error::{MatmulError, Result};
use crate::matrix::dims::Dims;
use rayon::prelude::*;
use std::ops::Range;

/// A fixed set of worker threads for the tiled kernels.
///
/// The unit of work is a row stripe: one row tile of C with all of its
/// column tiles. C is split into disjoint `&mut` chunks up front, so no two
/// workers can ever touch the same output element and nothing needs a lock
/// or an atomic. A and B are shared read-only.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    /// Builds a pool with `num_threads` workers (0 = one per core).
    pub fn new(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("mmult-worker-{i}"))
            .build()
            .map_err(|e| MatmulError::ThreadPool {
                message: e.to_string(),
            })?;

        log::debug!("worker pool ready with {} threads", pool.current_num_threads());
        Ok(Self { pool })
    }

    /// Builds a pool sized for one problem, see [`choose_thread_count`].
    pub fn for_problem(dims: Dims, tile: usize, max_threads: usize) -> Result<Self> {
        let max_threads = if max_threads == 0 {
            std::thread::available_parallelism().map_or(1, |n| n.get())
        } else {
            max_threads
        };
        Self::new(choose_thread_count(dims, tile, max_threads))
    }

    pub fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Runs `f` once per row stripe of `c` across the pool's workers.
    ///
    /// `f` gets the global row range of the stripe and the stripe's
    /// elements. Returns only after every stripe is done, so the caller can
    /// read `c` straight away.
    ///
    /// # Panics
    ///
    /// Panics if `tile` is zero. A panic inside `f` propagates to the caller
    /// once the other stripes have finished.
    pub fn run_row_blocks<T, F>(&self, c: &mut [T], dims: Dims, tile: usize, f: F)
    where
        T: Send,
        F: Fn(Range<usize>, &mut [T]) + Sync,
    {
        assert!(tile > 0, "tile edge length must be at least 1");
        if c.is_empty() {
            return;
        }

        let stripes: Vec<_> = tile_ranges(dims.m, tile)
            .zip(c.chunks_mut(stripe_len(dims, tile)))
            .collect();

        self.pool.install(|| {
            stripes
                .into_par_iter()
                .for_each(|(rows, stripe)| f(rows, stripe));
        });
    }
}

/// Picks a worker count for a problem.
///
/// Small problems aren't worth the hand-off, and there's no point having
/// more workers than row stripes:
/// - < 10M multiply-adds: 1 thread
/// - < 50M multiply-adds: 2 threads
/// - Otherwise: up to `max_threads`
pub fn choose_thread_count(dims: Dims, tile: usize, max_threads: usize) -> usize {
    const SINGLE_THREAD_THRESHOLD: usize = 10_000_000;
    const TWO_THREAD_THRESHOLD: usize = 50_000_000;

    let ops = dims.ops();
    let optimal_threads = if ops < SINGLE_THREAD_THRESHOLD {
        1
    } else if ops < TWO_THREAD_THRESHOLD {
        2
    } else {
        max_threads
    };

    let threads_by_rows = dims.m.div_ceil(tile.max(1)).max(1);

    optimal_threads
        .min(threads_by_rows)
        .min(max_threads)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_every_stripe_runs_once() {
        let pool = WorkerPool::new(4).unwrap();
        let dims = Dims::new(10, 1, 4);
        let mut c = vec![0u8; dims.c_len()];
        let seen = Mutex::new(Vec::new());

        pool.run_row_blocks(&mut c, dims, 3, |rows, stripe| {
            assert_eq!(stripe.len(), rows.len() * 4);
            for x in stripe.iter_mut() {
                *x += 1;
            }
            seen.lock().unwrap().push(rows);
        });

        let mut seen = seen.into_inner().unwrap();
        seen.sort_by_key(|r| r.start);
        assert_eq!(seen, vec![0..3, 3..6, 6..9, 9..10]);
        assert!(c.iter().all(|&x| x == 1));
    }

    #[test]
    fn test_tile_larger_than_matrix_is_one_stripe() {
        let pool = WorkerPool::new(2).unwrap();
        let dims = Dims::new(3, 1, 2);
        let mut c = vec![0u8; dims.c_len()];
        let calls = Mutex::new(0);

        pool.run_row_blocks(&mut c, dims, usize::MAX, |rows, stripe| {
            assert_eq!(rows, 0..3);
            assert_eq!(stripe.len(), 6);
            *calls.lock().unwrap() += 1;
        });

        assert_eq!(calls.into_inner().unwrap(), 1);
    }

    #[test]
    fn test_empty_output_is_a_no_op() {
        let pool = WorkerPool::new(2).unwrap();
        let mut c: Vec<i32> = Vec::new();
        pool.run_row_blocks(&mut c, Dims::new(0, 5, 5), 4, |_, _| {
            panic!("no stripes expected")
        });
    }

    #[test]
    fn test_adaptive_threading() {
        // 256³ = 16.7M multiply-adds
        assert_eq!(choose_thread_count(Dims::new(256, 256, 256), 32, 8), 2);

        // 1200×800×1600 = 1.5B multiply-adds
        assert_eq!(choose_thread_count(Dims::new(1200, 800, 1600), 32, 8), 8);

        // Tiny problem
        assert_eq!(choose_thread_count(Dims::new(2, 3, 2), 32, 8), 1);

        // Only two row stripes available
        assert_eq!(choose_thread_count(Dims::new(64, 4096, 4096), 32, 8), 2);
    }

    #[test]
    fn test_named_pool_reports_threads() {
        let pool = WorkerPool::new(3).unwrap();
        assert_eq!(pool.num_threads(), 3);
    }
}
