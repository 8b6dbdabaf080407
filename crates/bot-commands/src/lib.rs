//! Slash command dispatch for chat channels.
//!
//! A [`Registry`] holds the [`Definition`]s known to the bot, a [`Dispatcher`]
//! turns inbound message text into handler invocations, and
//! [`spawn_registration`] publishes the command list to a remote channel API
//! in the background.

mod builtin;
mod config;
mod dispatcher;
mod error;
mod registration;
mod registry;
mod types;

pub use builtin::builtin_definitions;
pub use config::CommandsConfig;
pub use dispatcher::{parse_command, Dispatcher, COMMAND_PREFIX};
pub use error::{CommandError, CommandResult};
pub use registration::{register_fn, spawn_registration, RegisterFn};
pub use registry::Registry;
pub use types::*;
