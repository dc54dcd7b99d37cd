//! Scoped CPU profiling around the measured kernels.

use anyhow::Context;
use pprof::{ProfilerGuard, ProfilerGuardBuilder};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Samples per second.
const FREQUENCY: i32 = 1000;

/// A running profiler that writes a flamegraph when it ends.
///
/// The profile is flushed by [`ProfileSession::finish`], or by `Drop` if the
/// run bails out early, so the profiler is always stopped. Failing to
/// profile never fails the run; it only logs a warning.
pub struct ProfileSession {
    guard: Option<ProfilerGuard<'static>>,
    path: PathBuf,
}

impl ProfileSession {
    /// Starts sampling. The flamegraph will be written to `path`.
    pub fn start(path: &Path) -> Self {
        let guard = match ProfilerGuardBuilder::default()
            .frequency(FREQUENCY)
            .blocklist(&["libc", "libgcc", "pthread", "vdso"])
            .build()
        {
            Ok(guard) => {
                log::debug!("profiling at {} Hz into {}", FREQUENCY, path.display());
                Some(guard)
            }
            Err(e) => {
                log::warn!("profiler failed to start, continuing without it: {e}");
                None
            }
        };

        Self {
            guard,
            path: path.to_path_buf(),
        }
    }

    /// A session that records nothing.
    pub fn disabled() -> Self {
        Self {
            guard: None,
            path: PathBuf::new(),
        }
    }

    /// Writes the profile and stops the profiler.
    pub fn finish(mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        // Dropping the guard at the end of this function stops sampling
        let Some(guard) = self.guard.take() else {
            return;
        };

        match write_flamegraph(&guard, &self.path) {
            Ok(()) => log::info!("profile written to {}", self.path.display()),
            Err(e) => log::warn!("couldn't write profile to {}: {e:#}", self.path.display()),
        }
    }
}

impl Drop for ProfileSession {
    fn drop(&mut self) {
        self.flush();
    }
}

fn write_flamegraph(guard: &ProfilerGuard<'_>, path: &Path) -> anyhow::Result<()> {
    let report = guard.report().build().context("building profile report")?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    report.flamegraph(file).context("rendering flamegraph")?;
    Ok(())
}
