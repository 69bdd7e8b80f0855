//! Verbosity-gated run logging.
//!
//! A small leveled logger shared by the pipeline and the CLI. Each log call
//! names the minimum verbosity at which it becomes visible, so `-v` shows
//! per-file progress, `-vv` per-match info and `-vvv` per-row debug output.
//! Errors are always printed.

use once_cell::sync::Lazy;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log level for run diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    fn prefix(self) -> &'static str {
        match self {
            LogLevel::Error => "[ERROR]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Info => "[INFO]",
            LogLevel::Debug => "[DEBUG]",
        }
    }
}

/// Global logger instance.
pub static LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// Leveled logger with an atomic verbosity threshold.
pub struct Logger {
    verbosity: AtomicU8,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            verbosity: AtomicU8::new(0),
        }
    }

    /// Set the verbosity threshold (the `-v` count from the CLI).
    pub fn set_verbosity(&self, verbosity: u8) {
        self.verbosity.store(verbosity, Ordering::Relaxed);
    }

    pub fn verbosity(&self) -> u8 {
        self.verbosity.load(Ordering::Relaxed)
    }

    /// Print `message` when the current verbosity is at least `min_level`.
    ///
    /// Errors ignore the threshold and go to stderr; everything else goes
    /// to stdout.
    pub fn log(&self, level: LogLevel, min_level: u8, message: &str) {
        if level != LogLevel::Error && self.verbosity() < min_level {
            return;
        }
        match level {
            LogLevel::Error => eprintln!("{} {}", level.prefix(), message),
            _ => println!("{} {}", level.prefix(), message),
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

/// Set the global verbosity threshold.
pub fn set_verbosity(verbosity: u8) {
    LOGGER.set_verbosity(verbosity);
}

/// Log an error. Always printed.
pub fn log_error(message: impl AsRef<str>) {
    LOGGER.log(LogLevel::Error, 0, message.as_ref());
}

/// Log a warning, visible at `min_level` and above.
pub fn log_warning(message: impl AsRef<str>, min_level: u8) {
    LOGGER.log(LogLevel::Warning, min_level, message.as_ref());
}

/// Log an info line, visible at `min_level` and above.
pub fn log_info(message: impl AsRef<str>, min_level: u8) {
    LOGGER.log(LogLevel::Info, min_level, message.as_ref());
}

/// Log a debug line, visible at `min_level` and above.
pub fn log_debug(message: impl AsRef<str>, min_level: u8) {
    LOGGER.log(LogLevel::Debug, min_level, message.as_ref());
}
