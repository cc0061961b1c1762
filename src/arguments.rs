/// Centralized argument handling for BoostBot
///
/// Keeps the process arguments in one place so the logger, the path resolver
/// and the binaries all see the same flags.
///
/// Features:
/// - Global CMD_ARGS storage with thread-safe access
/// - Flag and flag-value lookups
/// - Debug flag helpers for every log tag
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
/// Thread-safe singleton that stores arguments for access throughout the application
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Debug modules accepted as `--debug-<module>`
pub const DEBUG_MODULES: &[&str] = &["system", "config", "telegram", "api", "boosts", "storage"];

/// Sets the global command-line arguments
/// Used by binaries and tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    has_arg_in(&get_cmd_args(), arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    arg_value_in(&get_cmd_args(), flag)
}

fn has_arg_in(args: &[String], arg: &str) -> bool {
    args.iter().any(|a| a == arg)
}

fn arg_value_in(args: &[String], flag: &str) -> Option<String> {
    let prefixed = format!("{}=", flag);
    for (i, arg) in args.iter().enumerate() {
        if arg == flag {
            return args.get(i + 1).filter(|v| !v.starts_with("--")).cloned();
        }
        if let Some(value) = arg.strip_prefix(&prefixed) {
            return Some(value.to_string());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// =============================================================================

/// Returns true when `--debug-<module>` was passed
pub fn is_debug_enabled_for(module: &str) -> bool {
    has_arg(&format!("--debug-{}", module))
}

/// Gets a list of all enabled debug modes
pub fn get_enabled_debug_modes() -> Vec<&'static str> {
    DEBUG_MODULES
        .iter()
        .copied()
        .filter(|m| is_debug_enabled_for(m))
        .collect()
}

/// Prints debug information about current arguments and enabled debug modes
pub fn print_debug_info() {
    let enabled_modes = get_enabled_debug_modes();
    if !enabled_modes.is_empty() {
        println!("Enabled debug modes: {:?}", enabled_modes);
    }
}

/// Displays the help menu with all available flags and their descriptions
pub fn print_help() {
    println!("BoostBot - DexScreener token boost notifier for Telegram");
    println!();
    println!("USAGE:");
    println!("    boostbot [FLAGS]");
    println!();
    println!("CORE FLAGS:");
    println!("    --config <path>           Configuration file (default: <data dir>/data/config.toml)");
    println!("    --data-dir <path>         Base directory for data and logs");
    println!("    --seen-file <path>        Seen-token state file (overrides config)");
    println!("    --help, -h                Show this help message");
    println!("    --quiet, -q               Only log warnings and errors");
    println!("    --verbose, -v             Enable verbose logging for every module");
    println!();
    println!("DEBUG FLAGS:");
    println!("    --debug-api               DexScreener requests and responses");
    println!("    --debug-boosts            Boost workflow steps");
    println!("    --debug-config            Configuration loading");
    println!("    --debug-storage           Seen-token store reads and writes");
    println!("    --debug-system            Startup and shutdown");
    println!("    --debug-telegram          Telegram dispatcher and Bot API calls");
    println!();
    println!("ENVIRONMENT:");
    println!("    TELEGRAM_BOT_TOKEN        Bot token (overrides [telegram].bot_token)");
    println!("    BOOSTBOT_HOME             Base directory (overridden by --data-dir)");
    println!();
    println!("EXAMPLES:");
    println!("    boostbot                                   # Start the bot");
    println!("    boostbot --config ./config.toml            # Use a specific config file");
    println!("    boostbot --debug-api --debug-storage       # Trace upstream calls and state writes");
}

// =============================================================================
// COMMON ARGUMENT PATTERNS
// =============================================================================

/// Common argument parsing patterns used across binaries
pub mod patterns {
    use super::*;

    /// Checks for help flags
    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }

    /// Config file override
    pub fn get_config_path() -> Option<String> {
        get_arg_value("--config")
    }

    /// Base directory override
    pub fn get_data_dir() -> Option<String> {
        get_arg_value("--data-dir")
    }

    /// Seen-token state file override
    pub fn get_seen_file() -> Option<String> {
        get_arg_value("--seen-file")
    }
}
