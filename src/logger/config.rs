/// Logger configuration derived from command-line flags
///
/// Holds the minimum level plus the per-tag debug/verbose sets. The
/// configuration is global; `init_from_args` fills it once at startup and
/// tests can replace it with `set_logger_config`.
use super::levels::LogLevel;
use super::tags::LogTag;
use crate::arguments::get_cmd_args;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::sync::RwLock;

#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Lines above this level are dropped (Error always passes)
    pub min_level: LogLevel,
    /// Tags with `--debug-<tag>`
    pub debug_tags: HashSet<String>,
    /// Tags with `--verbose-<tag>`
    pub verbose_tags: HashSet<String>,
    /// Mirror console lines into the daily log file
    pub file_logging: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            min_level: LogLevel::Info,
            debug_tags: HashSet::new(),
            verbose_tags: HashSet::new(),
            file_logging: true,
        }
    }
}

static LOGGER_CONFIG: Lazy<RwLock<LoggerConfig>> =
    Lazy::new(|| RwLock::new(LoggerConfig::default()));

/// Snapshot of the current logger configuration
pub fn get_logger_config() -> LoggerConfig {
    match LOGGER_CONFIG.read() {
        Ok(config) => config.clone(),
        Err(_) => LoggerConfig::default(),
    }
}

/// Replace the logger configuration
pub fn set_logger_config(config: LoggerConfig) {
    if let Ok(mut guard) = LOGGER_CONFIG.write() {
        *guard = config;
    }
}

/// Modify the logger configuration in place
pub fn update_logger_config<F>(f: F)
where
    F: FnOnce(&mut LoggerConfig),
{
    if let Ok(mut guard) = LOGGER_CONFIG.write() {
        f(&mut guard);
    }
}

/// Build the configuration from the global argument list
pub fn init_from_args() {
    set_logger_config(config_from_args(&get_cmd_args()));
}

/// Parse logger flags out of an argument list
pub fn config_from_args(args: &[String]) -> LoggerConfig {
    let mut config = LoggerConfig::default();

    for arg in args {
        if let Some(tag) = arg.strip_prefix("--debug-") {
            config.debug_tags.insert(tag.to_lowercase());
            // A debug flag implies the threshold must let Debug through
            if config.min_level < LogLevel::Debug {
                config.min_level = LogLevel::Debug;
            }
        } else if let Some(tag) = arg.strip_prefix("--verbose-") {
            config.verbose_tags.insert(tag.to_lowercase());
            config.min_level = LogLevel::Verbose;
        } else if let Some(level) = arg.strip_prefix("--log-level=") {
            if let Some(level) = LogLevel::parse(level) {
                config.min_level = level;
            }
        }
    }

    if args.iter().any(|a| a == "--verbose" || a == "-v") {
        config.min_level = LogLevel::Verbose;
    }

    if args.iter().any(|a| a == "--quiet" || a == "-q") {
        config.min_level = LogLevel::Warning;
    }

    config
}

/// True when `--debug-<tag>` (or `--verbose-<tag>`) was passed for this tag
pub fn is_debug_enabled_for_tag(tag: &LogTag) -> bool {
    let config = get_logger_config();
    let key = tag.to_debug_key();
    config.debug_tags.contains(&key) || config.verbose_tags.contains(&key)
}

/// True when `--verbose-<tag>` was passed for this tag
pub fn is_verbose_enabled_for_tag(tag: &LogTag) -> bool {
    get_logger_config()
        .verbose_tags
        .contains(&tag.to_debug_key())
}
