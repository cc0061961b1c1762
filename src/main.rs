use boostbot::{
    arguments::{patterns, print_debug_info, print_help},
    config,
    logger::{self as logger, LogTag},
    storage::{JsonFileBackend, SeenTokenStore},
    telegram::{self, BotContext},
};

/// Main entry point for BoostBot
///
/// Startup order:
/// - data directories (the logger writes into them)
/// - logger
/// - config (file, .env, environment, CLI overrides)
/// - seen-token store
/// - Telegram dispatcher until Ctrl-C
#[tokio::main]
async fn main() {
    if let Err(e) = boostbot::paths::ensure_all_directories() {
        eprintln!("❌ Failed to create required directories: {}", e);
        std::process::exit(1);
    }

    logger::init();

    if patterns::is_help_requested() {
        print_help();
        std::process::exit(0);
    }

    logger::info(LogTag::System, "🚀 BoostBot starting up...");
    print_debug_info();

    if let Err(e) = config::load_config() {
        logger::error(LogTag::Config, &format!("❌ Failed to load configuration: {}", e));
        logger::flush();
        std::process::exit(1);
    }

    let cfg = config::get_config_clone();
    if cfg.telegram.bot_token.trim().is_empty() {
        logger::error(
            LogTag::Config,
            &format!(
                "❌ No bot token configured. Set [telegram].bot_token in config.toml or {}",
                config::BOT_TOKEN_ENV
            ),
        );
        logger::flush();
        std::process::exit(1);
    }

    let store = SeenTokenStore::new(JsonFileBackend::new(config::seen_tokens_path(&cfg)));

    let context = match BotContext::new(cfg, store) {
        Ok(context) => context,
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ Startup failed: {}", e));
            logger::flush();
            std::process::exit(1);
        }
    };

    match telegram::run(context).await {
        Ok(()) => {
            logger::info(LogTag::System, "✅ BoostBot stopped");
            logger::flush();
        }
        Err(e) => {
            logger::error(LogTag::System, &format!("❌ BoostBot failed: {}", e));
            logger::flush();
            std::process::exit(1);
        }
    }
}
