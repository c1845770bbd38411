use anyhow::Result;
use smartai_core::init_tracing;
use std::net::SocketAddr;
use tracing::{info, instrument};

use crate::components::{build_bot_components, build_handler_chain, build_teloxide_bot};
use crate::config::{BotConfig, Transport};
use crate::health::health_router;
use crate::telegram::{fetch_identity, run_polling, run_webhook};

/// Main entry: init logging, resolve transport, build components and chain, fetch the bot
/// identity, then dispatch until shutdown.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig, transport: Option<Transport>) -> Result<()> {
    init_tracing(config.log_file())?;
    let transport = config.base().resolve_transport(transport)?;

    info!(
        transport = ?transport,
        port = config.base().port,
        group_require_mention = config.base().group_require_mention,
        "Initializing bot"
    );

    let teloxide_bot = build_teloxide_bot(&config);
    let components = build_bot_components(&config, teloxide_bot.clone());
    fetch_identity(&teloxide_bot, &components.identity).await?;
    let handler_chain = build_handler_chain(&config, &components);
    let addr = SocketAddr::from(([0, 0, 0, 0], config.base().port));

    info!("Bot started successfully");

    match transport {
        Transport::Polling => run_polling(teloxide_bot, handler_chain, health_router(), addr).await,
        Transport::Webhook => {
            let url_str = config.base().webhook_url().ok_or_else(|| {
                smartai_core::BotError::Config("webhook URL requires PUBLIC_HOSTNAME".to_string())
            })?;
            let url = reqwest::Url::parse(&url_str).map_err(|e| {
                smartai_core::BotError::Config(format!("invalid webhook URL: {}", e))
            })?;
            run_webhook(teloxide_bot, handler_chain, health_router(), addr, url).await
        }
    }
}
