//! Structured logging system for BoostBot
//!
//! This module provides a small, ergonomic logging API with:
//! - Standard log levels (Error/Warning/Info/Debug/Verbose)
//! - Per-module debug control via --debug-<module> flags
//! - Dual output: colored console + daily log file
//! - A `log` facade bridge so teloxide/reqwest lines land in the same stream
//!
//! ## Usage
//!
//! ```rust,ignore
//! use boostbot::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Connection failed");
//! logger::warning(LogTag::Storage, "State file unreadable, starting empty");
//! logger::info(LogTag::Telegram, "Bot started");
//! logger::debug(LogTag::Api, "Request details: ..."); // Only if --debug-api
//! logger::verbose(LogTag::Boosts, "Raw payload: ..."); // Only if --verbose
//! ```
//!
//! ## Initialization
//!
//! Call once at startup, after `paths::ensure_all_directories()`:
//! ```rust,ignore
//! logger::init();
//! ```

mod bridge;
mod config;
mod core;
mod file;
mod format;
mod levels;
mod tags;

pub use config::{
    config_from_args, get_logger_config, init_from_args, set_logger_config, update_logger_config,
    LoggerConfig,
};
pub use levels::LogLevel;
pub use tags::LogTag;

/// Initialize the logger system
///
/// 1. Parse command-line arguments for debug flags
/// 2. Open the daily log file
/// 3. Route `log` facade records into this logger
pub fn init() {
    config::init_from_args();

    let config = get_logger_config();
    if config.file_logging {
        file::init_file_logging();
    }

    bridge::init_log_bridge(config.min_level);
}

/// Log at ERROR level (always shown)
pub fn error(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level
///
/// Shown by default and with --quiet.
pub fn warning(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level
///
/// Only shown when the matching --debug-<module> flag is provided.
///
/// # Example
/// ```rust,ignore
/// // Only shown with --debug-api
/// logger::debug(LogTag::Api, "GET https://api.dexscreener.com/...");
/// ```
pub fn debug(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Debug, message);
}

/// Log at VERBOSE level (very detailed tracing, --verbose only)
pub fn verbose(tag: LogTag, message: &str) {
    core::log_internal(tag, LogLevel::Verbose, message);
}

/// Force flush all pending log writes
///
/// Call this during shutdown to ensure all logs are written to disk.
pub fn flush() {
    file::flush_file_logging();
}
