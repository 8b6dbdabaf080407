//! Telegram channel adapter for the command core.

use crate::client::TelegramClient;
use crate::types::{BotCommand, BotMessage};
use bot_commands::{
    register_fn, spawn_registration, CommandError, Definition, RegisterFn, Request,
    CHANNEL_TELEGRAM,
};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Connects the Telegram client to command dispatch and registration.
pub struct TelegramChannel {
    client: TelegramClient,
    register_fn: RegisterFn,
    bot_username: Option<String>,
}

impl TelegramChannel {
    /// Create a channel that publishes commands with `setMyCommands`.
    pub fn new(client: TelegramClient) -> Self {
        let register_client = client.clone();
        let publish = register_fn(move |_ctx, definitions: Vec<Definition>| {
            let client = register_client.clone();
            async move {
                client
                    .set_my_commands(&menu_commands(&definitions))
                    .await
                    .map_err(|e| CommandError::Registration(e.to_string()))
            }
        });

        Self {
            client,
            register_fn: publish,
            bot_username: None,
        }
    }

    /// Replace the function used to publish commands.
    pub fn with_register_fn(mut self, register_fn: RegisterFn) -> Self {
        self.register_fn = register_fn;
        self
    }

    /// Set the bot's username so `/cmd@username` resolves to `/cmd`.
    pub fn with_bot_username(mut self, username: impl Into<String>) -> Self {
        let username = username.into();
        self.bot_username = Some(username.trim_start_matches('@').to_string());
        self
    }

    pub fn client(&self) -> &TelegramClient {
        &self.client
    }

    /// Publish `definitions` in the background.
    ///
    /// Returns immediately; failures are logged by the registration task.
    /// Called outside a Tokio runtime, it logs a warning, publishes nothing
    /// and returns `None`.
    pub fn start_command_registration(
        &self,
        ctx: CancellationToken,
        definitions: Vec<Definition>,
    ) -> Option<JoinHandle<()>> {
        spawn_registration(CHANNEL_TELEGRAM, ctx, self.register_fn.clone(), definitions)
    }

    /// Build the dispatch request for an inbound message.
    ///
    /// Returns `None` for commands addressed to another bot (`/cmd@other_bot`),
    /// or to any bot while this bot's username is unknown.
    pub fn request_for(&self, message: &BotMessage) -> Option<Request> {
        let text = addressed_text(&message.text, self.bot_username.as_deref())?;
        Some(Request::new(CHANNEL_TELEGRAM, text))
    }
}

/// Menu entries for the definitions usable on Telegram.
///
/// Names are unique: a later definition replaces an earlier one with the
/// same name and takes its own position.
pub fn menu_commands(definitions: &[Definition]) -> Vec<BotCommand> {
    let mut commands: Vec<BotCommand> = Vec::new();

    for d in definitions.iter().filter(|d| d.is_visible_on(CHANNEL_TELEGRAM)) {
        // Telegram rejects empty descriptions.
        let description = [&d.description, &d.usage, &d.name]
            .into_iter()
            .find(|s| !s.is_empty())
            .cloned()
            .unwrap_or_default();

        commands.retain(|c| c.command != d.name);
        commands.push(BotCommand {
            command: d.name.clone(),
            description,
        });
    }

    commands
}

/// Message text with this bot's mention removed from the command token,
/// or `None` when the command names some other bot.
fn addressed_text(text: &str, bot_username: Option<&str>) -> Option<String> {
    let Some(body) = text.strip_prefix('/') else {
        return Some(text.to_string());
    };

    let end = body.find(char::is_whitespace).unwrap_or(body.len());
    let Some((name, mention)) = body[..end].split_once('@') else {
        return Some(text.to_string());
    };

    match bot_username {
        Some(username) if mention.eq_ignore_ascii_case(username) => {
            Some(format!("/{}{}", name, &body[end..]))
        }
        _ => None,
    }
}
