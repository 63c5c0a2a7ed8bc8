//! Telegram update handlers.
//!
//! `/start` and `/info` answer with static text; any other text message
//! is scanned for a token address and answered with the pool ranking.

use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{LinkPreviewOptions, ParseMode, ReplyParameters};
use teloxide::utils::command::BotCommands;
use tracing::{debug, warn};

use crate::config::BotConfig;
use crate::market::scanner::PoolScanner;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Supported commands:")]
pub enum Command {
    #[command(description = "how to use the bot")]
    Start,
    #[command(description = "about this bot")]
    Info,
}

/// Dispatch tree: commands first, then plain text.
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Message::filter_text().endpoint(handle_text))
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    bot_config: Arc<BotConfig>,
) -> ResponseResult<()> {
    let text = match cmd {
        Command::Start => bot_config.welcome_text(),
        Command::Info => bot_config.info_message.clone(),
    };

    if let Err(e) = bot.send_message(msg.chat.id, text).await {
        warn!(chat_id = %msg.chat.id, command = ?cmd, error = %e, "Failed to answer command");
    }

    Ok(())
}

async fn handle_text(
    bot: Bot,
    msg: Message,
    text: String,
    scanner: Arc<PoolScanner>,
) -> ResponseResult<()> {
    let Some(reply) = scanner.respond(&text).await else {
        debug!(chat_id = %msg.chat.id, "Nothing to report");
        return Ok(());
    };

    let sent = bot
        .send_message(msg.chat.id, reply)
        .parse_mode(ParseMode::Html)
        .link_preview_options(LinkPreviewOptions {
            is_disabled: true,
            url: None,
            prefer_small_media: false,
            prefer_large_media: false,
            show_above_text: false,
        })
        .reply_parameters(ReplyParameters::new(msg.id))
        .await;

    if let Err(e) = sent {
        warn!(chat_id = %msg.chat.id, error = %e, "Failed to send pool ranking");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_and_info() {
        assert_eq!(Command::parse("/start", "radar_bot").unwrap(), Command::Start);
        assert_eq!(Command::parse("/info", "radar_bot").unwrap(), Command::Info);
        assert_eq!(
            Command::parse("/info@radar_bot", "radar_bot").unwrap(),
            Command::Info
        );
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert!(Command::parse("3N2pLFRZ2zcXxaFZX1hsrWsF9vKfLuWWcQz5qD9Yh1Zw", "radar_bot").is_err());
        assert!(Command::parse("/unknown", "radar_bot").is_err());
    }
}
