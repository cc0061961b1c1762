//! Telegram-backed [`ChatSink`]

use crate::boosts::{ChatSink, MessageHandle};
use crate::errors::BoostBotError;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{LinkPreviewOptions, MessageId, ParseMode};

fn preview_disabled() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

/// Sends replies to one chat
pub struct TelegramChatSink {
    bot: Bot,
    chat_id: ChatId,
}

impl TelegramChatSink {
    pub fn new(bot: Bot, chat_id: ChatId) -> Self {
        Self { bot, chat_id }
    }
}

#[async_trait]
impl ChatSink for TelegramChatSink {
    async fn send_plain(&self, text: &str) -> Result<MessageHandle, BoostBotError> {
        let message = self
            .bot
            .send_message(self.chat_id, text)
            .await
            .map_err(|e| BoostBotError::Telegram(format!("Failed to send message: {}", e)))?;
        Ok(MessageHandle(message.id.0))
    }

    async fn send_html(
        &self,
        text: &str,
        disable_preview: bool,
    ) -> Result<MessageHandle, BoostBotError> {
        let mut request = self
            .bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::Html);
        if disable_preview {
            request = request.link_preview_options(preview_disabled());
        }

        let message = request
            .await
            .map_err(|e| BoostBotError::Telegram(format!("Failed to send message: {}", e)))?;
        Ok(MessageHandle(message.id.0))
    }

    async fn edit_plain(&self, handle: MessageHandle, text: &str) -> Result<(), BoostBotError> {
        self.bot
            .edit_message_text(self.chat_id, MessageId(handle.0), text)
            .await
            .map_err(|e| BoostBotError::Telegram(format!("Failed to edit message: {}", e)))?;
        Ok(())
    }

    async fn delete(&self, handle: MessageHandle) -> Result<(), BoostBotError> {
        self.bot
            .delete_message(self.chat_id, MessageId(handle.0))
            .await
            .map_err(|e| BoostBotError::Telegram(format!("Failed to delete message: {}", e)))?;
        Ok(())
    }
}
