//! Telegram front end
//!
//! ```text
//! telegram/
//! ├── mod.rs        # This file - public API
//! ├── bot.rs        # Dispatcher and command endpoint
//! ├── commands.rs   # Command enum and routing
//! └── sink.rs       # ChatSink over the Bot API
//! ```

pub mod bot;
pub mod commands;
pub mod sink;

pub use bot::{run, BotContext};
pub use commands::{route, Command, CommandAction};
pub use sink::TelegramChatSink;
