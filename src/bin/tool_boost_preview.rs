//! Preview boost messages without Telegram
//!
//! Runs the same workflow as the bot against a sink that prints every
//! message to stdout. Seen-token tracking stays in memory unless
//! `--use-state-file` is given.

use anyhow::{bail, Context};
use async_trait::async_trait;
use boostbot::apis::DexScreenerClient;
use boostbot::arguments::set_cmd_args;
use boostbot::boosts::{BoostFetchWorkflow, ChatSink, MessageHandle};
use boostbot::config::{read_config_file, seen_tokens_path};
use boostbot::errors::BoostBotError;
use boostbot::logger::{self, LogLevel, LogTag};
use boostbot::storage::{JsonFileBackend, MemoryBackend, SeenTokenStore};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicI32, Ordering};

#[derive(Parser)]
#[command(name = "tool_boost_preview")]
#[command(about = "Print rendered DexScreener boost messages to stdout", long_about = None)]
struct Args {
    /// Use the top boosts feed instead of the latest one
    #[arg(long)]
    top: bool,

    /// Config file (defaults to the data directory's config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base directory for data (same as the bot's --data-dir)
    #[arg(long)]
    data_dir: Option<String>,

    /// Track against the real seen-token file instead of an in-memory store
    #[arg(long)]
    use_state_file: bool,

    /// Skip the pause between pairs requests
    #[arg(long)]
    no_delay: bool,

    /// Show API and workflow debug logs
    #[arg(short, long)]
    debug: bool,
}

/// Prints messages instead of sending them
#[derive(Default)]
struct StdoutSink {
    next_id: AtomicI32,
}

impl StdoutSink {
    fn next_handle(&self) -> MessageHandle {
        MessageHandle(self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[async_trait]
impl ChatSink for StdoutSink {
    async fn send_plain(&self, text: &str) -> Result<MessageHandle, BoostBotError> {
        let handle = self.next_handle();
        println!("[#{} plain] {}", handle.0, text);
        Ok(handle)
    }

    async fn send_html(
        &self,
        text: &str,
        _disable_preview: bool,
    ) -> Result<MessageHandle, BoostBotError> {
        let handle = self.next_handle();
        println!("{}", "=".repeat(80));
        println!("[#{} html]\n{}", handle.0, text);
        Ok(handle)
    }

    async fn edit_plain(&self, handle: MessageHandle, text: &str) -> Result<(), BoostBotError> {
        println!("[#{} edit] {}", handle.0, text);
        Ok(())
    }

    async fn delete(&self, handle: MessageHandle) -> Result<(), BoostBotError> {
        println!("[#{} deleted]", handle.0);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Path resolution reads the shared argument list, not clap's
    let mut shared_args = vec!["tool_boost_preview".to_string()];
    if let Some(dir) = &args.data_dir {
        shared_args.push("--data-dir".to_string());
        shared_args.push(dir.clone());
    }
    set_cmd_args(shared_args);

    logger::update_logger_config(|log_config| {
        log_config.file_logging = false;
        if args.debug {
            log_config.min_level = LogLevel::Debug;
            log_config.debug_tags.insert("api".to_string());
            log_config.debug_tags.insert("boosts".to_string());
        } else {
            log_config.min_level = LogLevel::Warning;
        }
    });

    let config_path = args.config.unwrap_or_else(boostbot::paths::get_config_path);
    let mut cfg = read_config_file(&config_path).map_err(anyhow::Error::msg)?;
    if args.no_delay {
        cfg.dexscreener.request_delay_ms = 0;
    }

    let client = DexScreenerClient::new(cfg.dexscreener.clone())
        .context("Failed to create DexScreener client")?;

    let store = if args.use_state_file {
        SeenTokenStore::new(JsonFileBackend::new(seen_tokens_path(&cfg)))
    } else {
        SeenTokenStore::new(MemoryBackend::new())
    };

    let (url, prefix) = if args.top {
        (cfg.dexscreener.top_boosts_url(), "Top")
    } else {
        (cfg.dexscreener.latest_boosts_url(), "Latest")
    };

    println!("Boost Preview Tool - {}\n", url);

    let sink = StdoutSink::default();
    let outcome = BoostFetchWorkflow::new(&client, &client, &store)
        .run(&sink, &url, prefix)
        .await;

    println!("\n{}", "=".repeat(80));
    println!("Delivered {} message(s)", outcome.delivered);

    if let Some(e) = outcome.failure {
        logger::error(LogTag::Boosts, &format!("Preview aborted: {}", e));
        bail!("preview failed: {}", e);
    }
    Ok(())
}
