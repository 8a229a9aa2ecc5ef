//! Reply delivery for Telegram.
//!
//! Handlers talk to [`ReplyTransport`] instead of `Bot` directly, so the
//! photo-to-text fallback can be exercised without a Telegram connection.

use anyhow::Result;
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatAction, ChatId, InputFile, MessageId, ReplyParameters};
use tracing::{debug, warn};

/// Outbound operations of one conversation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    /// Send a plain text reply.
    async fn send_text(&self, text: &str) -> Result<()>;
    /// Send a photo referenced by URL with `caption` attached.
    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<()>;
    /// Show the "typing" indicator.
    async fn send_typing(&self) -> Result<()>;
}

/// [`ReplyTransport`] bound to the chat and message being answered.
pub struct TelegramReplies {
    bot: Bot,
    chat_id: ChatId,
    reply_to: MessageId,
}

impl TelegramReplies {
    /// Create a transport replying to `msg`.
    #[must_use]
    pub fn new(bot: Bot, msg: &Message) -> Self {
        Self {
            bot,
            chat_id: msg.chat.id,
            reply_to: msg.id,
        }
    }

    // The original message may be deleted while the lookup runs
    fn reply_parameters(&self) -> ReplyParameters {
        ReplyParameters::new(self.reply_to).allow_sending_without_reply()
    }
}

#[async_trait]
impl ReplyTransport for TelegramReplies {
    async fn send_text(&self, text: &str) -> Result<()> {
        self.bot
            .send_message(self.chat_id, text)
            .reply_parameters(self.reply_parameters())
            .await?;
        Ok(())
    }

    async fn send_photo(&self, photo_url: &str, caption: &str) -> Result<()> {
        // Telegram fetches the picture itself; no bytes pass through the bot
        let url = reqwest::Url::parse(photo_url)?;
        self.bot
            .send_photo(self.chat_id, InputFile::url(url))
            .caption(caption)
            .reply_parameters(self.reply_parameters())
            .await?;
        Ok(())
    }

    async fn send_typing(&self) -> Result<()> {
        self.bot
            .send_chat_action(self.chat_id, ChatAction::Typing)
            .await?;
        Ok(())
    }
}

/// Sends `text` as a photo caption when `photo_url` is set, otherwise as text.
///
/// A failed photo send is logged and replaced by a single text reply with the
/// same content. Errors from the text send are returned to the caller.
///
/// # Errors
///
/// Returns an error if the text reply cannot be sent.
pub async fn deliver_reply(
    transport: &dyn ReplyTransport,
    text: &str,
    photo_url: Option<&str>,
) -> Result<()> {
    if let Some(url) = photo_url {
        match transport.send_photo(url, text).await {
            Ok(()) => {
                debug!("Profile card sent as photo caption");
                return Ok(());
            }
            Err(e) => warn!("Photo reply failed, falling back to text: {e}"),
        }
    }

    transport.send_text(text).await
}
