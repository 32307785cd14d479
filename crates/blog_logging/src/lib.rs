#![deny(missing_docs)]
//! Shared logging utilities for the blog workspace.
//!
//! This crate provides the `blog_*` logging macros used by the engine and the
//! command-line app, the logger initialization used by the binary, and a
//! minimal test initializer for the global logger.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! blog_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! blog_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! blog_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! blog_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! blog_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to the given file, truncating it.
    File(PathBuf),
    /// Write to the terminal (stderr for warnings and errors, stdout otherwise).
    Terminal,
    /// Write to both the terminal and the given file.
    Both(PathBuf),
}

/// Initialize the global logger.
///
/// If the log file cannot be created the logger degrades to terminal output
/// and a warning is printed to stderr. Calling this twice is a no-op.
pub fn initialize(destination: LogDestination, level: LevelFilter) {
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::Terminal => vec![terminal_logger(level, config)],
        LogDestination::File(path) => match create_file_logger(&path, level, config.clone()) {
            Some(file_logger) => vec![file_logger],
            None => vec![terminal_logger(level, config)],
        },
        LogDestination::Both(path) => {
            let mut loggers = vec![terminal_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(&path, level, config) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![terminal_logger(level, Config::default())]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn terminal_logger(level: LevelFilter, config: Config) -> Box<dyn SharedLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn create_file_logger(
    path: &Path,
    level: LevelFilter,
    config: Config,
) -> Option<Box<dyn SharedLogger>> {
    match File::create(path) {
        Ok(file) => {
            let logger: Box<dyn SharedLogger> = WriteLogger::new(level, config, file);
            Some(logger)
        }
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
