//! Command routing
//!
//! Maps each bot command to either a static reply or a boosts fetch. Routing
//! is pure so it can be tested without Telegram.

use crate::config::Config;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "DexScreener Boosts Bot commands:")]
pub enum Command {
    #[command(description = "Start the bot and show available commands")]
    Start,
    #[command(description = "Show detailed help information")]
    Help,
    #[command(description = "Get the latest token boosts")]
    LatestBoosts,
    #[command(description = "Get the most active token boosts")]
    TopBoosts,
}

/// What the handler should do for a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandAction {
    /// Plain-text reply
    ReplyPlain(String),
    /// HTML reply
    ReplyHtml(String),
    /// Run the boosts workflow
    FetchBoosts { url: String, label_prefix: String },
}

pub fn route(command: &Command, config: &Config) -> CommandAction {
    match command {
        Command::Start => CommandAction::ReplyPlain(welcome_text(&config.telegram.channel_link)),
        Command::Help => CommandAction::ReplyHtml(help_text(&config.telegram.channel_link)),
        Command::LatestBoosts => CommandAction::FetchBoosts {
            url: config.dexscreener.latest_boosts_url(),
            label_prefix: "Latest".to_string(),
        },
        Command::TopBoosts => CommandAction::FetchBoosts {
            url: config.dexscreener.top_boosts_url(),
            label_prefix: "Top".to_string(),
        },
    }
}

fn channel_footer(channel_link: &str, verb: &str) -> String {
    let link = channel_link.trim();
    if link.is_empty() {
        String::new()
    } else {
        format!("\n\n📢 For automatic updates, {} our channel:\n{}", verb, link)
    }
}

pub fn welcome_text(channel_link: &str) -> String {
    format!(
        "🚀 Welcome to DexScreener Boosts Bot! 🚀\n\n\
         Available commands:\n\
         /top_boosts - Get the most active token boosts\n\
         /latest_boosts - Get the latest token boosts\n\
         /help - Show detailed help information{}",
        channel_footer(channel_link, "subscribe to")
    )
}

pub fn help_text(channel_link: &str) -> String {
    format!(
        "📚 <b>DexScreener Boosts Bot Help</b>\n\n\
         <b>Available Commands:</b>\n\
         🔥 /top_boosts - View tokens with highest boost activity\n\
         ⚡️ /latest_boosts - Get real-time latest token boosts\n\
         ❓ /help - Show this help message\n\n\
         <b>Token Information Provided:</b>\n\
         • Token name and symbol\n\
         • Market cap and FDV\n\
         • Current price\n\
         • Liquidity\n\
         • Boost amount and total boost\n\
         • Social links (Website, Twitter, Telegram){}",
        channel_footer(&crate::utils::html_escape(channel_link), "join")
    )
}
