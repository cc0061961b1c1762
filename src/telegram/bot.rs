//! Bot runtime
//!
//! Builds the teloxide dispatcher, registers the command list and runs
//! long polling until Ctrl-C.

use crate::apis::DexScreenerClient;
use crate::boosts::BoostFetchWorkflow;
use crate::config::Config;
use crate::errors::BoostBotError;
use crate::logger::{self, LogTag};
use crate::storage::SeenTokenStore;
use crate::telegram::commands::{route, Command, CommandAction};
use crate::telegram::sink::TelegramChatSink;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::utils::command::BotCommands;

/// Shared state handed to every command handler
pub struct BotContext {
    pub config: Config,
    pub client: DexScreenerClient,
    pub store: SeenTokenStore,
}

impl BotContext {
    pub fn new(config: Config, store: SeenTokenStore) -> Result<Self, BoostBotError> {
        let client = DexScreenerClient::new(config.dexscreener.clone())?;
        Ok(Self {
            config,
            client,
            store,
        })
    }
}

/// Validate the token, register commands and poll until shutdown
pub async fn run(context: BotContext) -> Result<(), BoostBotError> {
    let token = context.config.telegram.bot_token.trim().to_string();
    if token.is_empty() {
        return Err(BoostBotError::Config(format!(
            "No bot token configured (set [telegram].bot_token or {})",
            crate::config::BOT_TOKEN_ENV
        )));
    }

    let bot = Bot::new(token);
    let me = bot
        .get_me()
        .await
        .map_err(|e| BoostBotError::Telegram(format!("Invalid bot token: {}", e)))?;
    logger::info(
        LogTag::Telegram,
        &format!(
            "Bot initialized: @{} (ID: {})",
            me.username.as_deref().unwrap_or("unknown"),
            me.id
        ),
    );

    if context.config.telegram.register_commands {
        match bot.set_my_commands(Command::bot_commands()).await {
            Ok(_) => logger::debug(LogTag::Telegram, "Command list registered"),
            Err(e) => logger::warning(
                LogTag::Telegram,
                &format!("Failed to register command list: {}", e),
            ),
        }
    }

    let handler = Update::filter_message()
        .filter_command::<Command>()
        .endpoint(answer);

    logger::info(LogTag::Telegram, "Polling for updates (Ctrl-C to stop)");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![Arc::new(context)])
        .default_handler(|update| async move {
            logger::verbose(
                LogTag::Telegram,
                &format!("Ignoring non-command update {:?}", update.id),
            );
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    logger::info(LogTag::Telegram, "Dispatcher stopped");
    Ok(())
}

/// Command endpoint; failures are logged and never stop the dispatcher
async fn answer(
    bot: Bot,
    msg: Message,
    cmd: Command,
    context: Arc<BotContext>,
) -> ResponseResult<()> {
    logger::info(
        LogTag::Telegram,
        &format!("Command {:?} from chat {}", cmd, msg.chat.id),
    );

    let result = match route(&cmd, &context.config) {
        CommandAction::ReplyPlain(text) => bot.send_message(msg.chat.id, text).await.map(|_| ()),
        CommandAction::ReplyHtml(text) => bot
            .send_message(msg.chat.id, text)
            .parse_mode(ParseMode::Html)
            .await
            .map(|_| ()),
        CommandAction::FetchBoosts { url, label_prefix } => {
            let sink = TelegramChatSink::new(bot.clone(), msg.chat.id);
            let outcome = BoostFetchWorkflow::new(&context.client, &context.client, &context.store)
                .run(&sink, &url, &label_prefix)
                .await;
            logger::debug(
                LogTag::Telegram,
                &format!(
                    "{:?} finished for chat {}: delivered={} failed={}",
                    cmd,
                    msg.chat.id,
                    outcome.delivered,
                    !outcome.is_success()
                ),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        logger::error(
            LogTag::Telegram,
            &format!("Failed to reply to chat {}: {}", msg.chat.id, e),
        );
    }
    Ok(())
}
