//! Chat bot - Main entry point.

use anyhow::Context;
use chat_bot::{AppResult, Bot, Config};
use telegram_client::{TelegramChannel, TelegramClient, UpdateReceiver};
use tokio::signal;
use tokio_stream::StreamExt;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting chat bot...");

    let client = TelegramClient::new(&config.telegram.api_url, &config.telegram.bot_token)?;

    // Health check; also learns the username used in group mentions
    let me = match client.get_me().await {
        Ok(me) => me,
        Err(e) => {
            error!("Telegram API not reachable at {}: {}", config.telegram.api_url, e);
            return Err(e.into());
        }
    };
    info!("Telegram API healthy - bot @{}", me.username.as_deref().unwrap_or("unknown"));

    let mut channel = TelegramChannel::new(client.clone());
    if let Some(username) = me.username {
        channel = channel.with_bot_username(username);
    }

    let bot = Bot::new(config.clone(), channel);
    info!("Registered {} commands", bot.registry().len());

    // Cancelled on shutdown so background registration stops with the bot
    let shutdown = CancellationToken::new();
    bot.start_command_registration(shutdown.child_token());

    // Start message receiver
    let receiver = UpdateReceiver::new(client, config.telegram.poll_timeout)
        .with_retry_delay(config.telegram.retry_delay);
    let mut stream = Box::pin(receiver.stream());

    info!("Listening for messages...");

    // Main message loop
    loop {
        tokio::select! {
            Some(message) = stream.next() => {
                if let Err(e) = bot.handle_message(&shutdown, &message).await {
                    error!("Failed to handle message: {}", e);
                }
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    shutdown.cancel();
    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
