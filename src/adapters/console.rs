//! Minimal `log` backend for the host binary.
//!
//! Writes `[LEVEL target] message` lines to stderr with the elapsed
//! milliseconds since install.  The level comes from `ROACH_LOG`
//! (`error`, `warn`, `info`, `debug`, `trace`), defaulting to `info`.

use std::io::Write as _;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

pub struct ConsoleLogger {
    start: Instant,
    level: LevelFilter,
}

impl ConsoleLogger {
    /// Install as the global logger.  Fails if one is already set.
    pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(Self {
            start: Instant::now(),
            level,
        });
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    /// Level named by `ROACH_LOG`, or `Info`.
    pub fn level_from_env() -> LevelFilter {
        std::env::var("ROACH_LOG")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(LevelFilter::Info)
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let ms = self.start.elapsed().as_millis();
        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "{:>8} [{:<5} {}] {}",
            ms,
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}
