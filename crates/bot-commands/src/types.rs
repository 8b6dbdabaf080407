//! Command definitions, requests and dispatch results.

use crate::error::{CommandError, CommandResult};
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub const CHANNEL_TELEGRAM: &str = "telegram";
pub const CHANNEL_WHATSAPP: &str = "whatsapp";
pub const CHANNEL_WHATSAPP_NATIVE: &str = "whatsapp_native";

/// Handler invoked when a command matches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Run the command for this request.
    async fn handle(&self, ctx: CancellationToken, request: Request) -> CommandResult;
}

/// Adapter turning an async closure into a [`CommandHandler`].
pub struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(CancellationToken, Request) -> Fut + Send + Sync,
    Fut: Future<Output = CommandResult> + Send,
{
    async fn handle(&self, ctx: CancellationToken, request: Request) -> CommandResult {
        (self.0)(ctx, request).await
    }
}

/// Wrap an async closure as a shareable handler.
pub fn handler_fn<F, Fut>(f: F) -> Arc<dyn CommandHandler>
where
    F: Fn(CancellationToken, Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = CommandResult> + Send + 'static,
{
    Arc::new(FnHandler(f))
}

/// Description of a single slash command.
///
/// An empty `channels` list disables the command everywhere. A definition
/// without a handler still matches; it only exists to be listed and
/// answered by the channel adapter.
#[derive(Clone, Default)]
pub struct Definition {
    /// Command name without the prefix (e.g., "help").
    pub name: String,
    /// One-line description shown in command menus.
    pub description: String,
    /// Usage line (e.g., "/show [model|channel]").
    pub usage: String,
    /// Channels the command is advertised and usable on.
    pub channels: Vec<String>,
    /// Optional handler.
    pub handler: Option<Arc<dyn CommandHandler>>,
}

impl Definition {
    /// Create a definition with no channels and no handler.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            ..Default::default()
        }
    }

    /// Set the usage line.
    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }

    /// Set the channels this command is visible on.
    pub fn with_channels<I, S>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.channels = channels.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a handler.
    pub fn with_handler(mut self, handler: Arc<dyn CommandHandler>) -> Self {
        self.handler = Some(handler);
        self
    }

    /// Whether the command is usable on `channel`.
    pub fn is_visible_on(&self, channel: &str) -> bool {
        self.channels.iter().any(|c| c == channel)
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("usage", &self.usage)
            .field("channels", &self.channels)
            .field("handler", &self.handler.is_some())
            .finish()
    }
}

/// Inbound message handed to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Channel identifier (e.g., "telegram").
    pub channel: String,
    /// Raw message body.
    pub text: String,
}

impl Request {
    pub fn new(channel: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            text: text.into(),
        }
    }
}

/// Outcome of a single dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchResult {
    /// Whether the text was recognized as a known command.
    pub matched: bool,
    /// Resolved command name when matched.
    pub command: Option<String>,
    /// Text following the command name.
    pub args: String,
    /// Error returned by the handler.
    pub error: Option<CommandError>,
}

impl DispatchResult {
    /// Result for text that is not a known command.
    pub fn unmatched() -> Self {
        Self::default()
    }

    /// Result for a matched command.
    pub fn matched(
        command: impl Into<String>,
        args: impl Into<String>,
        error: Option<CommandError>,
    ) -> Self {
        Self {
            matched: true,
            command: Some(command.into()),
            args: args.into(),
            error,
        }
    }

    /// Matched and the handler (if any) succeeded.
    pub fn is_success(&self) -> bool {
        self.matched && self.error.is_none()
    }
}
