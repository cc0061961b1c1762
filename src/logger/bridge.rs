/// Bridge from the `log` facade into the tagged logger
///
/// teloxide and reqwest report through `log`; their records are routed into
/// the same console/file sink so there is one log stream.
use super::core::log_internal;
use super::levels::LogLevel;
use super::tags::LogTag;

struct LogBridge;

/// Pick a tag from the record's module target
pub fn tag_for_target(target: &str) -> LogTag {
    let root = target.split("::").next().unwrap_or(target);
    match root {
        "teloxide" | "teloxide_core" => LogTag::Telegram,
        "reqwest" | "hyper" | "h2" | "rustls" => LogTag::Api,
        "boostbot" => LogTag::System,
        other => LogTag::Other(other.to_string()),
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        // Dependencies log at debug constantly; only surface them through
        // --debug-<tag> like everything else.
        log_internal(
            tag_for_target(record.target()),
            LogLevel::from_log_level(record.level()),
            &record.args().to_string(),
        );
    }

    fn flush(&self) {
        super::file::flush_file_logging();
    }
}

/// Install the bridge as the global `log` logger
///
/// Only the first call has an effect; later calls are ignored.
pub fn init_log_bridge(max_level: LogLevel) {
    if log::set_boxed_logger(Box::new(LogBridge)).is_ok() {
        log::set_max_level(max_level.to_level_filter());
    }
}
