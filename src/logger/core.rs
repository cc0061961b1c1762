/// Core logging implementation with automatic filtering
///
/// Decides whether a line passes the configured filters and hands it to the
/// formatter.
use super::config::{get_logger_config, is_debug_enabled_for_tag, is_verbose_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Levels above the minimum threshold are dropped
/// 3. Debug level requires --debug-<module> for that tag
/// 4. Verbose level requires --verbose OR --verbose-<module> for that tag
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug {
        return is_debug_enabled_for_tag(tag);
    }

    if level == LogLevel::Verbose {
        return is_verbose_enabled_for_tag(tag)
            || (config.min_level == LogLevel::Verbose && config.verbose_tags.is_empty());
    }

    true
}

/// Filter, then format and write
pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(&tag, level, message);
}
