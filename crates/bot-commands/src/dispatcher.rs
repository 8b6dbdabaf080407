//! Dispatcher that matches message text against the registry.

use crate::registry::Registry;
use crate::types::{DispatchResult, Request};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Prefix marking a message as a command invocation.
pub const COMMAND_PREFIX: char = '/';

/// Split command text into its name and argument text.
///
/// Returns `None` when the text does not start with [`COMMAND_PREFIX`] or
/// the name is empty.
pub fn parse_command(text: &str) -> Option<(&str, &str)> {
    let body = text.strip_prefix(COMMAND_PREFIX)?;
    let (name, args) = match body.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (body, ""),
    };

    if name.is_empty() {
        return None;
    }
    Some((name, args))
}

/// Routes requests to command handlers.
///
/// Handlers run inline on the calling task; concurrency is left to the
/// caller.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Match the request text and run the command handler, if any.
    pub async fn dispatch(&self, ctx: &CancellationToken, request: &Request) -> DispatchResult {
        let Some((name, args)) = parse_command(&request.text) else {
            return DispatchResult::unmatched();
        };

        let Some(definition) = self.registry.lookup(&request.channel, name) else {
            debug!(command = %name, channel = %request.channel, "Unknown command");
            return DispatchResult::unmatched();
        };

        debug!(command = %name, channel = %request.channel, "Dispatching command");

        let error = match &definition.handler {
            Some(handler) => handler.handle(ctx.clone(), request.clone()).await.err(),
            None => None,
        };

        DispatchResult::matched(name, args, error)
    }
}
