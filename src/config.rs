//! Run configuration for the harness.

use crate::matrix::dims::Dims;
use crate::variant::Variant;
use std::path::PathBuf;

/// Default problem size: A is 1200×800, B is 800×1600.
pub const DEFAULT_DIMS: Dims = Dims::new(1200, 800, 1600);

/// Default tile edge length. 3 × 32² × 4 bytes = 12 KB of working set.
pub const DEFAULT_TILE: usize = 32;

/// Where the profile flamegraph goes unless profiling is turned off.
pub const DEFAULT_PROFILE_PATH: &str = "mmult.svg";

/// Everything one harness run needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    pub variant: Variant,
    pub dims: Dims,
    pub tile: usize,
    /// Maximum worker threads, 0 = one per core
    pub threads: usize,
    /// RNG seed for A and B, `None` = pick one
    pub seed: Option<u64>,
    /// Profile output, `None` = don't profile
    pub profile: Option<PathBuf>,
}

impl RunConfig {
    pub fn new(variant: Variant) -> Self {
        Self {
            variant,
            dims: DEFAULT_DIMS,
            tile: DEFAULT_TILE,
            threads: 0,
            seed: None,
            profile: Some(PathBuf::from(DEFAULT_PROFILE_PATH)),
        }
    }
}
