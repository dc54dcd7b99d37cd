//! Multi-threaded tiled kernels.
//!
//! These wrap the single-threaded tile-block bodies from `blocked` with a
//! [`WorkerPool`]. Each worker owns whole row stripes of the output, so
//! they never need to synchronize until the final join.
//!
//! Available implementations:
//! - `matmul_tiled_eager_mt`
//! - `matmul_tiled_stream_mt`
//! - `matmul_tiled_3d_mt`

pub mod pool;
pub mod tiled_mt;

pub use pool::{WorkerPool, choose_thread_count};
