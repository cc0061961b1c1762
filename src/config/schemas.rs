/// Configuration schemas - every section defined once with its defaults
///
/// Each struct is defined using the config_struct! macro, so a config file
/// only needs the keys that differ from the defaults. An empty file (or no
/// file at all) is a valid configuration apart from the bot token.
use crate::config_struct;

// ============================================================================
// TELEGRAM CONFIGURATION
// ============================================================================

config_struct! {
    /// Telegram bot settings
    pub struct TelegramConfig {
        /// Bot token from @BotFather; TELEGRAM_BOT_TOKEN overrides it
        bot_token: String = String::new(),
        /// Channel advertised at the end of /start and /help
        channel_link: String = String::new(),
        /// Publish the command list with setMyCommands on startup
        register_commands: bool = true,
    }
}

// ============================================================================
// DEXSCREENER CONFIGURATION
// ============================================================================

config_struct! {
    /// DexScreener API endpoints and request pacing
    pub struct DexScreenerConfig {
        base_url: String = "https://api.dexscreener.com".to_string(),
        latest_boosts_path: String = "token-boosts/latest/v1".to_string(),
        top_boosts_path: String = "token-boosts/top/v1".to_string(),
        /// Joined with `/{token_address}`
        token_pairs_path: String = "latest/dex/tokens".to_string(),
        /// Courtesy pause before every pairs request
        request_delay_ms: u64 = 500,
        timeout_secs: u64 = 10,
    }
}

impl DexScreenerConfig {
    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    pub fn latest_boosts_url(&self) -> String {
        self.endpoint_url(&self.latest_boosts_path)
    }

    pub fn top_boosts_url(&self) -> String {
        self.endpoint_url(&self.top_boosts_path)
    }

    pub fn token_pairs_url(&self, token_address: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint_url(&self.token_pairs_path).trim_end_matches('/'),
            token_address
        )
    }
}

// ============================================================================
// STORAGE CONFIGURATION
// ============================================================================

config_struct! {
    /// Seen-token state persistence
    pub struct StorageConfig {
        /// Empty means `<data dir>/seen_tokens.json`
        seen_tokens_file: String = String::new(),
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration loaded from config.toml
    pub struct Config {
        telegram: TelegramConfig = TelegramConfig::default(),
        dexscreener: DexScreenerConfig = DexScreenerConfig::default(),
        storage: StorageConfig = StorageConfig::default(),
    }
}
