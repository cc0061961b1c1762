/// Message formatting for boost notifications
///
/// Pure functions only. Every upstream string goes through `html_escape`
/// before it lands in Telegram HTML.
use super::types::TokenDetails;
use crate::apis::dexscreener::{BoostLink, BoostRecord};
use crate::storage::TrackOutcome;
use crate::utils::html_escape;
use serde_json::Value;

const NOT_AVAILABLE: &str = "N/A";
const UNKNOWN: &str = "Unknown";
const SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

/// Format a USD amount with K/M/B/T suffixes
pub fn format_number(value: Option<f64>) -> String {
    let Some(mut value) = value else {
        return NOT_AVAILABLE.to_string();
    };

    let mut index = 0;
    while value.abs() >= 1000.0 && index < SUFFIXES.len() - 1 {
        value /= 1000.0;
        index += 1;
    }
    format!("${:.2}{}", value, SUFFIXES[index])
}

/// Format a USD price with 8 decimals
pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(price) => format!("${:.8}", price),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Raw JSON value as shown to users: strings unquoted, null as N/A
pub fn display_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => NOT_AVAILABLE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn link_emoji(label: &str) -> &'static str {
    match label {
        "Website" => "🌐",
        "Twitter" => "🐦",
        "Telegram" => "📱",
        "Discord" => "💬",
        _ => "🔗",
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// Label shown for a social link: `label`, else the capitalised `type`, else "Link"
pub fn link_label(link: &BoostLink) -> String {
    if let Some(label) = link.label.as_deref().filter(|l| !l.trim().is_empty()) {
        return label.to_string();
    }
    match link.link_type.as_deref().filter(|t| !t.trim().is_empty()) {
        Some(link_type) => capitalize(link_type),
        None => "Link".to_string(),
    }
}

fn text_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty()).unwrap_or(fallback)
}

/// Render one boost notification as Telegram HTML
pub fn render(
    boost: &BoostRecord,
    details: &TokenDetails,
    tracking: &TrackOutcome,
    fetch_time: &str,
    label_prefix: &str,
) -> String {
    let status = if tracking.is_new { "🆕 NEW!" } else { "📊 Updated" };

    let mut lines = vec![
        format!("🚀 <b>{} Token Boost</b> {}\n", html_escape(label_prefix), status),
        "💎 <b>Token Information:</b>".to_string(),
        format!(
            "• Name: {} ({})",
            html_escape(text_or(details.name.as_deref(), UNKNOWN)),
            html_escape(text_or(details.symbol.as_deref(), UNKNOWN))
        ),
        format!("• Market Cap: {}", format_number(details.market_cap)),
        format!("• FDV: {}", format_number(details.fdv)),
        format!("• Price: {}", format_price(details.price)),
        format!("• Liquidity: {}\n", format_number(details.liquidity)),
        "📈 <b>Boost Details:</b>".to_string(),
        format!("• Boost Amount: {}", html_escape(&display_value(boost.amount.as_ref()))),
        format!(
            "• Total Boost Amount: {}\n",
            html_escape(&display_value(boost.total_amount.as_ref()))
        ),
        "⚙️ <b>Additional Information:</b>".to_string(),
        format!(
            "• Chain: {}",
            html_escape(text_or(boost.chain_id.as_deref(), NOT_AVAILABLE))
        ),
        format!(
            "• Token Address: <code>{}</code>",
            html_escape(text_or(boost.token_address.as_deref(), NOT_AVAILABLE))
        ),
        format!("• First Seen: {}", html_escape(&tracking.first_seen)),
        format!("• Last Updated: {}\n", html_escape(fetch_time)),
    ];

    let links: Vec<(&BoostLink, &str)> = boost
        .links
        .iter()
        .flatten()
        .filter_map(|link| {
            link.url
                .as_deref()
                .filter(|u| !u.trim().is_empty())
                .map(|url| (link, url))
        })
        .collect();

    if !links.is_empty() {
        lines.push("🔗 <b>Social Links:</b>".to_string());
        for (link, url) in links {
            let label = link_label(link);
            lines.push(format!(
                "• {} <a href='{}'>{}</a>",
                link_emoji(&label),
                html_escape(url),
                html_escape(&label)
            ));
        }
    }

    if let Some(url) = boost.url.as_deref().filter(|u| !u.trim().is_empty()) {
        lines.push(format!("\n🔍 <a href='{}'>View on DexScreener</a>", html_escape(url)));
    }

    lines.join("\n")
}
