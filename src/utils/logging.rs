//! Diagnostic logger for lsx.
//!
//! A minimal [log] backend writing timestamped records to stderr. The level comes from
//! the `LSX_LOG` environment variable and defaults to `warn`. Listing output and the
//! user-facing error messages never go through here.

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use std::sync::OnceLock;

/// Environment variable holding the log level.
pub const LOG_LEVEL_ENV: &str = "LSX_LOG";

pub struct Logger {
    level: Level,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            eprintln!(
                "{} {} [{}] {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Parses a level name, case-insensitively. `off` and garbage yield `None`.
pub fn parse_level(value: &str) -> Option<Level> {
    value
        .parse::<LevelFilter>()
        .ok()
        .and_then(|filter| filter.to_level())
}

fn level_from_env() -> Level {
    std::env::var(LOG_LEVEL_ENV)
        .ok()
        .as_deref()
        .and_then(parse_level)
        .unwrap_or(Level::Warn)
}

/// Installs the logger once. Later calls are no-ops.
pub fn init() -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    if LOGGER.get().is_some() {
        return Ok(());
    }

    let level = level_from_env();
    let logger = LOGGER.get_or_init(|| Logger { level });
    log::set_logger(logger)?;
    log::set_max_level(level.to_level_filter());
    Ok(())
}
