/// Configuration utilities - loading and access helpers
///
/// - Loading configuration from disk (missing file → defaults)
/// - Environment overrides for secrets
/// - Thread-safe global access
use super::schemas::Config;
use crate::logger::{self, LogTag};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// Global configuration instance
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Environment variable that overrides `[telegram].bot_token`
pub const BOT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// Read and parse a config file; a missing file yields defaults
///
/// Parse errors are reported rather than silently replaced with defaults,
/// since a typo in a key would otherwise go unnoticed.
pub fn read_config_file(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        logger::warning(
            LogTag::Config,
            &format!("Config file '{}' not found, using default values", path.display()),
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

    toml::from_str::<Config>(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))
}

/// Apply environment and command-line overrides on top of a parsed config
pub fn apply_overrides(config: &mut Config, token_env: Option<String>, seen_file: Option<String>) {
    if let Some(token) = token_env.filter(|t| !t.trim().is_empty()) {
        config.telegram.bot_token = token.trim().to_string();
    }

    if let Some(path) = seen_file.filter(|p| !p.trim().is_empty()) {
        config.storage.seen_tokens_file = path;
    }
}

/// Load configuration from a specific file path and initialize the global CONFIG
///
/// `.env` is honoured for TELEGRAM_BOT_TOKEN.
pub fn load_config_from_path(path: &Path) -> Result<(), String> {
    let _ = dotenv::dotenv();

    let mut config = read_config_file(path)?;
    apply_overrides(
        &mut config,
        std::env::var(BOT_TOKEN_ENV).ok(),
        crate::arguments::patterns::get_seen_file(),
    );

    logger::debug(
        LogTag::Config,
        &format!(
            "Config loaded: base_url={}, request_delay_ms={}, timeout_secs={}",
            config.dexscreener.base_url,
            config.dexscreener.request_delay_ms,
            config.dexscreener.timeout_secs
        ),
    );

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())
}

/// Load configuration from `--config` or the default location
pub fn load_config() -> Result<(), String> {
    let path = crate::arguments::patterns::get_config_path()
        .map(PathBuf::from)
        .unwrap_or_else(crate::paths::get_config_path);
    load_config_from_path(&path)
}

/// Execute a function with read access to the configuration
///
/// Falls back to defaults when `load_config()` has not run (tools, tests).
///
/// # Example
/// ```rust,ignore
/// let delay = with_config(|cfg| cfg.dexscreener.request_delay_ms);
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    match CONFIG.get().map(|lock| lock.read()) {
        Some(Ok(config)) => f(&config),
        _ => f(&Config::default()),
    }
}

/// Get a clone of the entire configuration
///
/// Useful when values are needed across await points.
pub fn get_config_clone() -> Config {
    with_config(|cfg| cfg.clone())
}

/// Resolved seen-token state file path
pub fn seen_tokens_path(config: &Config) -> PathBuf {
    if config.storage.seen_tokens_file.trim().is_empty() {
        crate::paths::get_seen_tokens_path()
    } else {
        PathBuf::from(&config.storage.seen_tokens_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.dexscreener.request_delay_ms, 500);
        assert_eq!(
            config.dexscreener.latest_boosts_url(),
            "https://api.dexscreener.com/token-boosts/latest/v1"
        );
        assert_eq!(
            config.dexscreener.top_boosts_url(),
            "https://api.dexscreener.com/token-boosts/top/v1"
        );
        assert_eq!(
            config.dexscreener.token_pairs_url("So11111111111111111111111111111111111111112"),
            "https://api.dexscreener.com/latest/dex/tokens/So11111111111111111111111111111111111111112"
        );
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[telegram]\nchannel_link = \"https://t.me/boosts\"\n\n[dexscreener]\nbase_url = \"http://localhost:9000/\""
        )
        .unwrap();

        let config = read_config_file(file.path()).unwrap();
        assert_eq!(config.telegram.channel_link, "https://t.me/boosts");
        assert!(config.telegram.register_commands);
        assert_eq!(
            config.dexscreener.latest_boosts_url(),
            "http://localhost:9000/token-boosts/latest/v1"
        );
        assert_eq!(config.dexscreener.timeout_secs, 10);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config_file(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[dexscreener]\nrequest_delay_ms = \"slow\"").unwrap();
        assert!(read_config_file(file.path()).is_err());
    }

    #[test]
    fn test_overrides() {
        let mut config = Config::default();
        config.telegram.bot_token = "from-file".to_string();

        apply_overrides(&mut config, Some("  ".to_string()), None);
        assert_eq!(config.telegram.bot_token, "from-file");

        apply_overrides(
            &mut config,
            Some("123:abc".to_string()),
            Some("/tmp/seen.json".to_string()),
        );
        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(seen_tokens_path(&config), PathBuf::from("/tmp/seen.json"));
    }

    #[test]
    fn test_config_serialization() {
        let toml_str = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml_str.contains("[telegram]"));
        assert!(toml_str.contains("[dexscreener]"));
        assert!(toml_str.contains("[storage]"));
    }
}
