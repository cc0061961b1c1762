//! Centralized path resolution for BoostBot
//!
//! All file and directory paths are resolved through this module so the bot,
//! the preview tool and the logger agree on where state lives.
//!
//! ## Path Strategy
//!
//! The base directory is chosen in this order:
//! 1. `--data-dir <path>` command-line flag
//! 2. `BOOSTBOT_HOME` environment variable
//! 3. Platform data directory (`dirs::data_local_dir()/BoostBot`)
//!
//! ## Directory Structure
//!
//! ```text
//! BoostBot/
//! ├── data/
//! │ ├── config.toml
//! │ └── seen_tokens.json
//! └── logs/
//!   └── boostbot_YYYY-MM-DD.log
//! ```

use once_cell::sync::Lazy;
use std::path::PathBuf;

use crate::arguments::patterns;

const APP_DIR: &str = "BoostBot";

/// Lazy-initialized base directory (thread-safe)
static BASE_DIRECTORY: Lazy<PathBuf> = Lazy::new(resolve_base_directory);

fn resolve_base_directory() -> PathBuf {
  if let Some(dir) = patterns::get_data_dir() {
    return PathBuf::from(dir);
  }

  if let Ok(dir) = std::env::var("BOOSTBOT_HOME") {
    if !dir.trim().is_empty() {
      return PathBuf::from(dir);
    }
  }

  if let Some(dir) = dirs::data_local_dir() {
    return dir.join(APP_DIR);
  }

  if let Some(home) = dirs::home_dir() {
    return home.join(APP_DIR);
  }

  PathBuf::from(APP_DIR)
}

// =============================================================================
// DIRECTORY ACCESSORS
// =============================================================================

/// Returns the base directory for all BoostBot data
pub fn get_base_directory() -> PathBuf {
  BASE_DIRECTORY.clone()
}

/// Returns the data directory path (config and state files)
pub fn get_data_directory() -> PathBuf {
  BASE_DIRECTORY.join("data")
}

/// Returns the logs directory path
pub fn get_logs_directory() -> PathBuf {
  BASE_DIRECTORY.join("logs")
}

// =============================================================================
// FILE PATHS
// =============================================================================

/// Returns the main configuration file path
pub fn get_config_path() -> PathBuf {
  get_data_directory().join("config.toml")
}

/// Returns the default seen-token state file path
pub fn get_seen_tokens_path() -> PathBuf {
  get_data_directory().join("seen_tokens.json")
}

/// Ensures all required directories exist
///
/// Must run before `logger::init()` so the log file can be created.
pub fn ensure_all_directories() -> Result<(), String> {
  let dirs_to_create = [
    ("base", get_base_directory()),
    ("data", get_data_directory()),
    ("logs", get_logs_directory()),
  ];

  for (name, dir) in dirs_to_create {
    if !dir.exists() {
      std::fs::create_dir_all(&dir).map_err(|e| {
        format!(
          "Failed to create {} directory at {}: {}",
          name,
          dir.display(),
          e
        )
      })?;

      eprintln!("Created directory: {}", dir.display());
    }
  }

  Ok(())
}
