//! Runs one tiled kernel against the naive reference and verifies it.
//!
//! ```text
//! mmult <INDEX> [--m 1200] [--k 800] [--n 1600] [--tile 32] [--threads 0]
//!               [--seed S] [--profile-path mmult.svg] [--no-profile]
//! ```
//!
//! INDEX picks the kernel: 1 = eager tiling, 2 = streaming accumulate,
//! 3 = three-level blocking.

mod logger;
mod profile;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use mmult::config::{DEFAULT_DIMS, DEFAULT_PROFILE_PATH, DEFAULT_TILE, RunConfig};
use mmult::{Dims, MatmulError, Matrix, Variant, WorkerPool, matmul_naive_ijk, multiply, verify};
use profile::ProfileSession;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(
    name = "mmult",
    version,
    about = "Multiply two random integer matrices with a tiled kernel and check the result"
)]
struct Args {
    /// Kernel to run: 1 = eager tiling, 2 = streaming accumulate, 3 = 3-level blocking
    index: u32,

    /// Rows of A and C
    #[arg(long, default_value_t = DEFAULT_DIMS.m)]
    m: usize,

    /// Columns of A, rows of B
    #[arg(long, default_value_t = DEFAULT_DIMS.k)]
    k: usize,

    /// Columns of B and C
    #[arg(long, default_value_t = DEFAULT_DIMS.n)]
    n: usize,

    /// Tile edge length
    #[arg(long, default_value_t = DEFAULT_TILE)]
    tile: usize,

    /// Maximum worker threads (0 = one per core)
    #[arg(long, default_value_t = 0)]
    threads: usize,

    /// Seed for the random operands (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write the profile flamegraph
    #[arg(long, default_value = DEFAULT_PROFILE_PATH)]
    profile_path: PathBuf,

    /// Don't profile
    #[arg(long)]
    no_profile: bool,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, env = "MMULT_LOG", default_value = "info")]
    log_level: LevelFilter,
}

impl Args {
    fn into_config(self) -> Result<RunConfig, MatmulError> {
        let variant = Variant::try_from(self.index)?;
        if self.tile == 0 {
            return Err(MatmulError::InvalidTile { edge: self.tile });
        }

        let mut config = RunConfig::new(variant);
        config.dims = Dims::new(self.m, self.k, self.n);
        config.tile = self.tile;
        config.threads = self.threads;
        config.seed = self.seed;
        config.profile = (!self.no_profile).then_some(self.profile_path);
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.log_level)?;

    // Reject a bad selector before allocating anything
    let config = args.into_config()?;
    run(&config)
}

fn run(config: &RunConfig) -> anyhow::Result<()> {
    let (variant, dims, tile) = (config.variant, config.dims, config.tile);
    let seed = config.seed.unwrap_or_else(rand::random);

    log::info!(
        "{} with kernel {}, tile {}, seed {}",
        dims,
        variant,
        tile,
        seed
    );

    let mut rng = StdRng::seed_from_u64(seed);
    let a = Matrix::<i32>::random(dims.m, dims.k, &mut rng).context("allocating A")?;
    let b = Matrix::<i32>::random(dims.k, dims.n, &mut rng).context("allocating B")?;
    let mut c = Matrix::<i32>::zeros(dims.m, dims.n).context("allocating reference output")?;
    let mut r = Matrix::<i32>::zeros(dims.m, dims.n).context("allocating kernel output")?;

    let pool = WorkerPool::for_problem(dims, tile, config.threads)?;
    log::info!("using {} worker threads", pool.num_threads());

    {
        let session = match &config.profile {
            Some(path) => ProfileSession::start(path),
            None => ProfileSession::disabled(),
        };

        let start = Instant::now();
        matmul_naive_ijk(a.as_slice(), b.as_slice(), c.as_mut_slice(), dims);
        log::info!("reference: {:.2} ms", elapsed_ms(start));

        let start = Instant::now();
        multiply(
            variant,
            a.as_slice(),
            b.as_slice(),
            r.as_mut_slice(),
            dims,
            tile,
            &pool,
        )?;
        log::info!("{}: {:.2} ms", variant.name(), elapsed_ms(start));

        session.finish();
    }

    print!("Verification... ");
    std::io::stdout().flush()?;

    if let Err(e) = verify(&c, &r) {
        // A wrong answer is a kernel bug, not something to recover from
        log::error!("kernel {} produced a wrong result: {}", variant, e);
        log::logger().flush();
        std::process::abort();
    }
    println!("done!");

    Ok(())
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
