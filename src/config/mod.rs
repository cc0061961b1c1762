//! Configuration system
//!
//! `config.toml` is parsed into [`Config`]; every key is optional. Access it
//! through [`with_config`] or take a [`get_config_clone`] snapshot.

mod macros;
pub mod schemas;
pub mod utils;

pub use schemas::{Config, DexScreenerConfig, StorageConfig, TelegramConfig};
pub use utils::{
    apply_overrides, get_config_clone, load_config, load_config_from_path, read_config_file,
    seen_tokens_path, with_config, BOT_TOKEN_ENV,
};
