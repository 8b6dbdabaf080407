//! Telegram Bot API HTTP client.

use crate::error::TelegramError;
use crate::types::*;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    // Contains the bot token; never log it.
    base_url: String,
}

impl TelegramClient {
    /// Create a new client for `bot_token` against `api_url`
    /// (normally `https://api.telegram.org`).
    pub fn new(api_url: impl AsRef<str>, bot_token: impl AsRef<str>) -> Result<Self, TelegramError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            client,
            base_url: format!(
                "{}/bot{}",
                api_url.as_ref().trim_end_matches('/'),
                bot_token.as_ref()
            ),
        })
    }

    async fn call<B, T>(
        &self,
        method: &str,
        body: &B,
        timeout: Option<Duration>,
    ) -> Result<T, TelegramError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self
            .client
            .post(format!("{}/{}", self.base_url, method))
            .json(body);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let envelope: ApiResponse<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => return Err(TelegramError::Json(e)),
            Err(_) => return Err(TelegramError::Api(format!("{}: {}", status, text))),
        };

        if !envelope.ok {
            let description = envelope
                .description
                .unwrap_or_else(|| status.to_string());
            return Err(TelegramError::Api(description));
        }

        envelope
            .result
            .ok_or_else(|| TelegramError::Api(format!("{} returned no result", method)))
    }

    /// Get the bot's own user.
    #[instrument(skip(self))]
    pub async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &serde_json::json!({}), None).await
    }

    /// Check that the token is valid and the API reachable.
    pub async fn health_check(&self) -> bool {
        self.get_me().await.is_ok()
    }

    /// Replace the bot's command menu.
    #[instrument(skip(self, commands), fields(count = commands.len()))]
    pub async fn set_my_commands(&self, commands: &[BotCommand]) -> Result<(), TelegramError> {
        let request = SetMyCommandsRequest {
            commands: commands.to_vec(),
        };
        let _: bool = self.call("setMyCommands", &request, None).await?;
        debug!("Published {} commands", commands.len());
        Ok(())
    }

    /// Long-poll for updates after `offset`.
    #[instrument(skip(self))]
    pub async fn get_updates(
        &self,
        offset: Option<i64>,
        poll_timeout: Duration,
    ) -> Result<Vec<Update>, TelegramError> {
        let request = GetUpdatesRequest {
            offset,
            timeout: poll_timeout.as_secs(),
            allowed_updates: vec!["message".into()],
        };

        let updates: Vec<Update> = self
            .call("getUpdates", &request, Some(poll_timeout + REQUEST_TIMEOUT))
            .await?;
        debug!("Received {} updates", updates.len());
        Ok(updates)
    }

    /// Send a text message to a chat.
    #[instrument(skip(self, text))]
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_to_message_id: Option<i64>,
    ) -> Result<(), TelegramError> {
        let request = SendMessageRequest {
            chat_id,
            text: text.to_string(),
            reply_to_message_id,
        };

        let result: Result<serde_json::Value, _> = self.call("sendMessage", &request, None).await;
        match result {
            Ok(_) => {
                debug!("Sent message to {}", chat_id);
                Ok(())
            }
            Err(TelegramError::Api(msg)) => {
                warn!("Send failed: {}", msg);
                Err(TelegramError::SendFailed(msg))
            }
            Err(e) => Err(e),
        }
    }

    /// Reply to a message in the chat it came from.
    pub async fn reply(&self, original: &BotMessage, text: &str) -> Result<(), TelegramError> {
        let reply_to = original.is_group.then_some(original.message_id);
        self.send_message(original.chat_id, text, reply_to).await
    }
}
