//! Common test utilities for integration tests.

use bot_commands::CommandsConfig;
use chat_bot::config::{BotConfig, Config, TelegramConfig};
use std::time::Duration;
use telegram_client::{BotMessage, TelegramChannel, TelegramClient};
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "TEST_TOKEN";

/// Configuration pointing at a mock Telegram server.
pub fn test_config(mock_server: &MockServer) -> Config {
    Config {
        telegram: TelegramConfig {
            bot_token: TEST_TOKEN.into(),
            api_url: mock_server.uri(),
            poll_timeout: Duration::ZERO,
            retry_delay: Duration::from_millis(10),
        },
        bot: BotConfig {
            log_level: "debug".into(),
            model: "test-model".into(),
            models: "test-model,other-model".into(),
        },
        commands: CommandsConfig::default(),
    }
}

/// Telegram channel configured for a mock server.
pub fn test_channel(mock_server: &MockServer) -> TelegramChannel {
    let client = TelegramClient::new(mock_server.uri(), TEST_TOKEN).unwrap();
    TelegramChannel::new(client).with_bot_username("test_bot")
}

/// Private-chat message with the given text.
pub fn message(text: &str) -> BotMessage {
    BotMessage {
        update_id: 1,
        message_id: 10,
        chat_id: 42,
        sender_id: Some(7),
        sender_username: Some("ada".into()),
        text: text.into(),
        date: 1_700_000_000,
        is_group: false,
    }
}

/// Path of a Bot API method on the mock server.
pub fn api_path(method: &str) -> String {
    format!("/bot{}/{}", TEST_TOKEN, method)
}
