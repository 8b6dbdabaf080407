//! Command registry with per-channel lookup.

use crate::types::Definition;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Read-only set of command definitions.
///
/// When two definitions share a name on the same channel, the one
/// registered last wins: `lookup` returns it and `list` shows only it,
/// at its own registration position.
pub struct Registry {
    definitions: Vec<Definition>,
    // channel -> name -> index into `definitions`
    index: HashMap<String, HashMap<String, usize>>,
}

impl Registry {
    /// Build a registry from definitions in registration order.
    pub fn new(definitions: Vec<Definition>) -> Self {
        let mut kept = Vec::with_capacity(definitions.len());
        let mut index: HashMap<String, HashMap<String, usize>> = HashMap::new();

        for def in definitions {
            if def.name.is_empty() {
                warn!("Skipping command definition with empty name");
                continue;
            }

            let position = kept.len();
            for channel in &def.channels {
                let names = index.entry(channel.clone()).or_default();
                if names.insert(def.name.clone(), position).is_some() {
                    debug!(command = %def.name, channel = %channel, "Command redefined, later definition wins");
                }
            }
            kept.push(def);
        }

        Self {
            definitions: kept,
            index,
        }
    }

    /// Find the command `name` usable on `channel`.
    pub fn lookup(&self, channel: &str, name: &str) -> Option<&Definition> {
        self.index
            .get(channel)
            .and_then(|names| names.get(name))
            .map(|&i| &self.definitions[i])
    }

    /// Commands usable on `channel`, in registration order.
    pub fn list(&self, channel: &str) -> Vec<&Definition> {
        let Some(names) = self.index.get(channel) else {
            return Vec::new();
        };

        self.definitions
            .iter()
            .enumerate()
            .filter(|(i, def)| names.get(&def.name) == Some(i))
            .map(|(_, def)| def)
            .collect()
    }

    /// All definitions, including ones not visible on any channel.
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn def(name: &str, description: &str, channels: &[&str]) -> Definition {
        Definition::new(name, description).with_channels(channels.iter().copied())
    }

    fn names(defs: &[&Definition]) -> Vec<String> {
        defs.iter().map(|d| d.name.clone()).collect()
    }

    #[test]
    fn test_lookup_by_channel_and_name() {
        let registry = Registry::new(vec![
            def("help", "Help", &["telegram", "whatsapp"]),
            def("start", "Start", &["telegram"]),
        ]);

        assert!(registry.lookup("telegram", "help").is_some());
        assert!(registry.lookup("whatsapp", "help").is_some());
        assert!(registry.lookup("telegram", "start").is_some());
        assert!(registry.lookup("whatsapp", "start").is_none());
        assert!(registry.lookup("telegram", "missing").is_none());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = Registry::new(vec![def("help", "Help", &["telegram"])]);

        assert!(registry.lookup("telegram", "Help").is_none());
        assert!(registry.lookup("Telegram", "help").is_none());
        assert!(registry.lookup("telegram", "help").is_some());
    }

    #[test]
    fn test_empty_channels_disables_command() {
        let registry = Registry::new(vec![def("hidden", "Hidden", &[])]);

        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("telegram", "hidden").is_none());
        assert!(registry.list("telegram").is_empty());
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let registry = Registry::new(vec![
            def("start", "Start", &["telegram"]),
            def("help", "Help", &["telegram", "whatsapp"]),
            def("show", "Show", &["whatsapp"]),
            def("list", "List", &["telegram"]),
        ]);

        assert_eq!(names(&registry.list("telegram")), ["start", "help", "list"]);
        assert_eq!(names(&registry.list("whatsapp")), ["help", "show"]);
        assert!(registry.list("discord").is_empty());
    }

    #[test]
    fn test_duplicate_name_last_registered_wins() {
        let registry = Registry::new(vec![
            def("help", "First", &["telegram"]),
            def("start", "Start", &["telegram"]),
            def("help", "Second", &["telegram"]),
        ]);

        let found = registry.lookup("telegram", "help").unwrap();
        assert_eq!(found.description, "Second");

        let listed = registry.list("telegram");
        assert_eq!(names(&listed), ["start", "help"]);
        assert_eq!(listed[1].description, "Second");
    }

    #[test]
    fn test_duplicate_only_shadows_shared_channels() {
        let registry = Registry::new(vec![
            def("help", "Everywhere", &["telegram", "whatsapp"]),
            def("help", "Telegram only", &["telegram"]),
        ]);

        assert_eq!(registry.lookup("telegram", "help").unwrap().description, "Telegram only");
        assert_eq!(registry.lookup("whatsapp", "help").unwrap().description, "Everywhere");
        assert_eq!(registry.list("telegram").len(), 1);
        assert_eq!(registry.list("whatsapp").len(), 1);
    }

    #[test]
    fn test_empty_name_is_skipped() {
        let registry = Registry::new(vec![def("", "Nameless", &["telegram"])]);

        assert!(registry.is_empty());
        assert!(registry.lookup("telegram", "").is_none());
    }
}
