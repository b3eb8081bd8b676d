#![cfg(feature = "std")]

//! Stderr logger for the binaries. Stdout stays free for game output and the
//! `sim` JSON summary.

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log level (`error` .. `trace`, or `off`).
pub const LOG_ENV: &str = "SONAR_LOG";

struct SonarLogger;

impl Log for SonarLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{:<5} {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: SonarLogger = SonarLogger;

/// Level named by `raw`, case-insensitive; `info` when missing or unknown.
pub fn parse_level(raw: Option<&str>) -> LevelFilter {
    raw.and_then(|lvl| lvl.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Level named by the `SONAR_LOG` environment variable.
pub fn log_level_from_env() -> LevelFilter {
    parse_level(std::env::var(LOG_ENV).ok().as_deref())
}

/// Install the stderr logger. Calling it again is harmless.
pub fn init_logging() {
    let level = log_level_from_env();
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}
