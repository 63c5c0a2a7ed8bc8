use std::sync::Arc;

use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use teloxide::dispatching::ShutdownToken;
use teloxide::prelude::*;
use tracing::{debug, info, warn};

use crate::agent::telegram;
use crate::config::{AppConfig, Secrets};
use crate::data::meteora::{build_http_client, GroupQuery, MeteoraSource};
use crate::data::PoolSource;
use crate::market::scanner::PoolScanner;

/// Build one source per configured endpoint, sharing a single HTTP client.
pub fn build_scanner(config: &AppConfig) -> Result<PoolScanner> {
    let http = build_http_client(&config.http)?;
    let query = GroupQuery::from(&config.ranking);

    let sources: Vec<Box<dyn PoolSource>> = config
        .sources
        .iter()
        .map(|source| {
            Box::new(MeteoraSource::new(http.clone(), source, query.clone())) as Box<dyn PoolSource>
        })
        .collect();

    Ok(PoolScanner::new(
        sources,
        config.ranking.clone(),
        config.bot.reply_header.clone(),
    ))
}

/// Run the bot until SIGINT/SIGTERM. In-flight handlers finish before return.
pub async fn run(config: AppConfig, secrets: Secrets) -> Result<()> {
    let scanner = Arc::new(build_scanner(&config)?);
    let bot_config = Arc::new(config.bot.clone());

    let bot = Bot::new(secrets.bot_token.expose_secret());
    let me = bot.get_me().await.context("Failed to validate bot token")?;

    info!(
        bot = me.username.as_deref().unwrap_or("unknown"),
        sources = ?scanner.source_names(),
        min_liquidity = %config.ranking.min_liquidity,
        top_n = config.ranking.top_n,
        "Bot connected"
    );

    let mut dispatcher = Dispatcher::builder(bot, telegram::schema())
        .dependencies(dptree::deps![scanner, bot_config])
        .default_handler(|update| async move {
            debug!(update_id = ?update.id, "Ignoring unsupported update");
        })
        .enable_ctrlc_handler()
        .build();

    spawn_terminate_listener(dispatcher.shutdown_token());

    dispatcher.dispatch().await;

    info!("Dispatcher stopped, exiting");
    Ok(())
}

/// SIGINT is handled by the dispatcher itself; SIGTERM goes through the token.
fn spawn_terminate_listener(token: ShutdownToken) {
    tokio::spawn(async move {
        if let Err(e) = terminate_signal().await {
            warn!(error = %e, "Failed to listen for SIGTERM");
            return;
        }

        info!("SIGTERM received, stopping gracefully");
        match token.shutdown() {
            Ok(done) => done.await,
            Err(e) => debug!(error = %e, "Dispatcher was not running"),
        }
    });
}

#[cfg(unix)]
async fn terminate_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    terminate.recv().await;
    Ok(())
}

#[cfg(not(unix))]
async fn terminate_signal() -> std::io::Result<()> {
    std::future::pending().await
}
