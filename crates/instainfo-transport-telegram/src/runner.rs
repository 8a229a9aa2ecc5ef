use crate::bot::handlers::{
    classify, get_first_name, get_user_id_safe, handle_inbound, Command, Inbound,
};
use crate::bot::messaging::TelegramReplies;
use crate::config::BotSettings;
use instainfo_core::resolver::ProfileResolver;
use instainfo_core::scraper::{InstagramClient, ProfileScraper};
use instainfo_core::utils::truncate_str;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::Me;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

/// Run the Telegram transport runtime.
pub async fn run_bot(settings: Arc<BotSettings>) {
    let resolver = init_resolver(&settings);

    let bot = Bot::new(settings.telegram.telegram_token.clone());
    register_commands(&bot).await;
    let handler = setup_handler();

    info!("Bot is running...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![resolver])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
}

fn init_resolver(settings: &BotSettings) -> Arc<ProfileResolver> {
    let scraper: Arc<dyn ProfileScraper> = Arc::new(InstagramClient::new(&settings.lookup));
    info!(
        "Instagram client initialized (api base: {}).",
        settings.lookup.instagram_api_base
    );
    Arc::new(ProfileResolver::new(scraper))
}

async fn register_commands(bot: &Bot) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!("Failed to register bot commands: {}", e);
    }
}

fn setup_handler() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message()
        .filter_map(|msg: Message, me: Me| {
            msg.text().and_then(|text| classify(text, me.username()))
        })
        .endpoint(handle_message)
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    inbound: Inbound,
    resolver: Arc<ProfileResolver>,
) -> Result<(), teloxide::RequestError> {
    let user_id = get_user_id_safe(&msg);
    let first_name = get_first_name(&msg);

    match &inbound {
        Inbound::Command(cmd) => {
            info!("User {user_id} ({first_name}) sent command {cmd:?}.");
        }
        Inbound::Text(text) => {
            info!(
                "Lookup request from user {user_id} ({first_name}). Text: '{}'",
                truncate_str(text, 100)
            );
        }
    }

    let transport = TelegramReplies::new(bot, &msg);
    if let Err(e) = handle_inbound(&transport, &resolver, &first_name, inbound).await {
        error!("Handler error for user {user_id}: {e}");
    }
    respond(())
}
