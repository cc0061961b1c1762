/// Small shared helpers: timestamps and HTML escaping
use chrono::{DateTime, Utc};

/// Human-readable UTC timestamp used for first-seen and fetch times
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Format a UTC instant with second precision
pub fn format_utc_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Current time in [`TIMESTAMP_FORMAT`]
pub fn utc_timestamp_now() -> String {
    format_utc_timestamp(Utc::now())
}

/// Escape text for Telegram's HTML parse mode (also safe inside attributes)
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
