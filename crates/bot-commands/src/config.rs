//! Command subsystem configuration.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct CommandsConfig {
    /// Publish the command list to channels at startup
    #[serde(default = "default_true")]
    pub register_on_startup: bool,

    /// Answer unknown slash commands instead of ignoring them
    #[serde(default = "default_true")]
    pub reply_unknown: bool,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            register_on_startup: default_true(),
            reply_unknown: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
