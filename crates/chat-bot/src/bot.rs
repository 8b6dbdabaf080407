//! Message handling: dispatch inbound text and answer builtin commands.

use crate::config::Config;
use crate::error::AppResult;
use bot_commands::{
    builtin_definitions, parse_command, DispatchResult, Dispatcher, Registry, CHANNEL_TELEGRAM,
};
use std::sync::Arc;
use telegram_client::{BotMessage, TelegramChannel};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

/// Reply sent when a command handler fails.
pub const ERROR_REPLY: &str = "Sorry, something went wrong.";

/// Chat bot wiring the command core to the Telegram channel.
pub struct Bot {
    dispatcher: Dispatcher,
    channel: TelegramChannel,
    config: Config,
}

impl Bot {
    /// Create a bot serving the builtin command catalog.
    pub fn new(config: Config, channel: TelegramChannel) -> Self {
        let registry = Registry::new(builtin_definitions(Some(&config.commands)));
        Self::with_registry(config, channel, Arc::new(registry))
    }

    /// Create a bot serving a custom registry.
    pub fn with_registry(config: Config, channel: TelegramChannel, registry: Arc<Registry>) -> Self {
        Self {
            dispatcher: Dispatcher::new(registry),
            channel,
            config,
        }
    }

    pub fn registry(&self) -> &Registry {
        self.dispatcher.registry()
    }

    /// Publish the command list to Telegram without waiting for the result.
    ///
    /// Only the definitions visible on Telegram are sent, one per name.
    pub fn start_command_registration(&self, ctx: CancellationToken) -> Option<JoinHandle<()>> {
        if !self.config.commands.register_on_startup {
            info!("Command registration disabled");
            return None;
        }

        let definitions = self
            .registry()
            .list(CHANNEL_TELEGRAM)
            .into_iter()
            .cloned()
            .collect();
        self.channel.start_command_registration(ctx, definitions)
    }

    /// Handle one inbound message, replying when there is something to say.
    pub async fn handle_message(&self, ctx: &CancellationToken, message: &BotMessage) -> AppResult<()> {
        if let Some(reply) = self.reply_for(ctx, message).await {
            self.channel.client().reply(message, &reply).await?;
        }
        Ok(())
    }

    /// Dispatch a message and compute the reply text, if any.
    pub async fn reply_for(&self, ctx: &CancellationToken, message: &BotMessage) -> Option<String> {
        // Commands addressed to another bot are not ours to answer.
        let request = self.channel.request_for(message)?;
        let result = self.dispatcher.dispatch(ctx, &request).await;

        if let Some(e) = &result.error {
            error!(command = ?result.command, error = %e, "Command failed");
            return Some(ERROR_REPLY.into());
        }

        if result.matched {
            return self.render(&result);
        }

        if self.config.commands.reply_unknown {
            if let Some((name, _)) = parse_command(&request.text) {
                return Some(format!(
                    "Unknown command: /{}\nSend /help to see available commands.",
                    name
                ));
            }
        }

        None
    }

    fn render(&self, result: &DispatchResult) -> Option<String> {
        let command = result.command.as_deref()?;
        let arg = result.args.split_whitespace().next();

        let reply = match (command, arg) {
            ("start", _) => "Hi! I'm ready. Send /help to see what I can do.".to_string(),
            ("help", _) => self.help_text(),
            ("show", Some("model")) => format!("Current model: {}", self.config.bot.model),
            ("show", Some("channel")) => format!("Current channel: {}", CHANNEL_TELEGRAM),
            ("list", Some("models")) => {
                let mut lines = vec!["Available models:".to_string()];
                for model in self.config.bot.model_list() {
                    let marker = if model == self.config.bot.model { " (current)" } else { "" };
                    lines.push(format!("- {}{}", model, marker));
                }
                lines.join("\n")
            }
            ("list", Some("channels")) => format!("Enabled channels:\n- {}", CHANNEL_TELEGRAM),
            ("show", _) | ("list", _) => self.usage_hint(command),
            // Custom commands answer through their own handlers.
            _ => return None,
        };
        Some(reply)
    }

    fn help_text(&self) -> String {
        let mut lines = vec!["Available commands:".to_string()];
        for def in self.registry().list(CHANNEL_TELEGRAM) {
            let usage = if def.usage.is_empty() {
                format!("/{}", def.name)
            } else {
                def.usage.clone()
            };
            lines.push(format!("{} - {}", usage, def.description));
        }
        lines.join("\n")
    }

    fn usage_hint(&self, command: &str) -> String {
        match self.registry().lookup(CHANNEL_TELEGRAM, command) {
            Some(def) if !def.usage.is_empty() => format!("Usage: {}", def.usage),
            _ => format!("Usage: /{}", command),
        }
    }
}
