use crate::styles::{self, colors_enabled_stderr};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Level selected by the `--quiet` / `--verbose` flags. Verbose wins.
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            LogLevel::Debug
        } else if quiet {
            LogLevel::Warning
        } else {
            LogLevel::Info
        }
    }
}

static LOG_LEVEL: OnceLock<LogLevel> = OnceLock::new();

pub fn init_logging(verbose: bool, quiet: bool) {
    LOG_LEVEL.set(LogLevel::from_flags(verbose, quiet)).ok(); // First caller wins
}

pub fn get_log_level() -> LogLevel {
    *LOG_LEVEL.get().unwrap_or(&LogLevel::Info)
}

pub fn enabled(level: LogLevel) -> bool {
    level <= get_log_level()
}

pub fn log(level: LogLevel, message: &str) {
    if !enabled(level) {
        return;
    }
    // Debug lines go to stderr so they never interleave with captured stdout.
    match level {
        LogLevel::Error if colors_enabled_stderr() => {
            eprintln!("{}error:{} {message}", styles::RED, styles::RESET)
        }
        LogLevel::Error => eprintln!("error: {message}"),
        LogLevel::Warning => eprintln!("warning: {message}"),
        LogLevel::Info => println!("{message}"),
        LogLevel::Debug => eprintln!("debug: {message}"),
    }
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Error, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log($crate::logging::LogLevel::Debug, &format!($($arg)*))
    };
}
