//! Minimal stderr sink for the `log` facade.

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::time::Instant;

struct StderrLogger {
    level: LevelFilter,
    start: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        // Ignore write errors; there's nowhere left to report them
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{:>9.3}s {:<5} {}] {}",
            elapsed,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Installs the logger for the whole process. Can only be called once.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(StderrLogger {
        level,
        start: Instant::now(),
    }))?;
    log::set_max_level(level);
    Ok(())
}
