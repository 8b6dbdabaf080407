//! Default command catalog shared by all channels.

use crate::config::CommandsConfig;
use crate::types::{Definition, CHANNEL_TELEGRAM, CHANNEL_WHATSAPP, CHANNEL_WHATSAPP_NATIVE};

const DEFAULT_CHANNELS: [&str; 3] = [CHANNEL_TELEGRAM, CHANNEL_WHATSAPP, CHANNEL_WHATSAPP_NATIVE];

/// Builtin command definitions.
///
/// None of them carry a handler; channel adapters answer them.
pub fn builtin_definitions(_config: Option<&CommandsConfig>) -> Vec<Definition> {
    vec![
        Definition::new("start", "Start the bot")
            .with_usage("/start")
            .with_channels(DEFAULT_CHANNELS),
        Definition::new("help", "Show this help message")
            .with_usage("/help")
            .with_channels(DEFAULT_CHANNELS),
        Definition::new("show", "Show current configuration")
            .with_usage("/show [model|channel]")
            .with_channels(DEFAULT_CHANNELS),
        Definition::new("list", "List available options")
            .with_usage("/list [models|channels]")
            .with_channels(DEFAULT_CHANNELS),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_defaults(defs: &[Definition]) {
        for want in ["start", "help", "show", "list"] {
            let def = defs
                .iter()
                .find(|d| d.name == want)
                .unwrap_or_else(|| panic!("missing command {want:?}"));
            for channel in ["telegram", "whatsapp", "whatsapp_native"] {
                assert!(def.is_visible_on(channel), "{want} not on {channel}");
            }
        }
    }

    #[test]
    fn test_builtin_definitions_without_config() {
        assert_defaults(&builtin_definitions(None));
    }

    #[test]
    fn test_builtin_definitions_ignore_config_values() {
        let config = CommandsConfig {
            register_on_startup: false,
            reply_unknown: false,
        };
        assert_defaults(&builtin_definitions(Some(&config)));
        assert_defaults(&builtin_definitions(Some(&CommandsConfig::default())));
    }

    #[test]
    fn test_builtin_definitions_have_usage_and_no_handler() {
        for def in builtin_definitions(None) {
            assert!(def.usage.starts_with(&format!("/{}", def.name)));
            assert!(!def.description.is_empty());
            assert!(def.handler.is_none());
        }
    }
}
