use crate::bot::messaging::{deliver_reply, ReplyTransport};
use anyhow::Result;
use instainfo_core::format::{render_help, render_result, render_start};
use instainfo_core::resolver::ProfileResolver;
use teloxide::{prelude::*, utils::command::BotCommands};
use tracing::{info, warn};

/// Supported commands for the bot
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    /// Show the welcome message
    #[command(description = "Start the bot.")]
    Start,
    /// Show usage help
    #[command(description = "How to use the bot.")]
    Help,
}

/// A text message the bot reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inbound {
    /// A recognised command
    Command(Command),
    /// Free text, treated as an Instagram username
    Text(String),
}

/// Sorts message text into a command or a lookup request.
///
/// Command names match case-insensitively, so `/START` and `/Help@bot` work.
/// Text starting with `/` that is not a known command yields `None` and is
/// ignored, as are commands addressed to a different bot.
#[must_use]
pub fn classify(text: &str, bot_username: &str) -> Option<Inbound> {
    if text.starts_with('/') {
        let token_end = text.find(char::is_whitespace).unwrap_or(text.len());
        let (token, args) = text.split_at(token_end);
        let normalized = format!("{}{args}", token.to_lowercase());
        return Command::parse(&normalized, bot_username)
            .ok()
            .map(Inbound::Command);
    }
    Some(Inbound::Text(text.to_string()))
}

/// Safe extraction of user ID from a message.
/// Returns 0 if the user information is missing.
#[must_use]
pub fn get_user_id_safe(msg: &Message) -> i64 {
    msg.from.as_ref().map_or(0, |u| u.id.0.cast_signed())
}

/// Sender's first name, or "Unknown" for anonymous senders.
#[must_use]
pub fn get_first_name(msg: &Message) -> String {
    msg.from
        .as_ref()
        .map(|u| u.first_name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Route one classified message to its handler.
///
/// # Errors
///
/// Returns an error if the final reply cannot be sent.
pub async fn handle_inbound(
    transport: &dyn ReplyTransport,
    resolver: &ProfileResolver,
    first_name: &str,
    inbound: Inbound,
) -> Result<()> {
    match inbound {
        Inbound::Command(Command::Start) => start(transport, first_name).await,
        Inbound::Command(Command::Help) => help(transport).await,
        Inbound::Text(text) => lookup(transport, resolver, &text).await,
    }
}

/// Start handler
///
/// # Errors
///
/// Returns an error if the welcome message cannot be sent.
pub async fn start(transport: &dyn ReplyTransport, first_name: &str) -> Result<()> {
    transport.send_text(&render_start(first_name)).await
}

/// Help handler
///
/// # Errors
///
/// Returns an error if the help message cannot be sent.
pub async fn help(transport: &dyn ReplyTransport) -> Result<()> {
    transport.send_text(render_help()).await
}

/// Resolve the username in `text` and reply with the profile card or an error.
///
/// # Errors
///
/// Returns an error if the reply cannot be sent.
pub async fn lookup(
    transport: &dyn ReplyTransport,
    resolver: &ProfileResolver,
    text: &str,
) -> Result<()> {
    if let Err(e) = transport.send_typing().await {
        warn!("Failed to send typing indicator: {e}");
    }

    let result = resolver.resolve(text).await;
    let reply = render_result(&result);
    info!(
        "Lookup finished (success: {}), sending reply",
        result.is_success()
    );

    deliver_reply(transport, &reply, result.profile_pic_url()).await
}
