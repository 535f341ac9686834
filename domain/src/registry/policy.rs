//! Registry entries and the registry itself

use super::known_options::KnownOption;
use crate::store::normalize_option;
use std::collections::BTreeMap;

/// A (section, option) pair.
///
/// The option part is normalized the same way the store normalizes keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OptionKey {
    section: String,
    option: String,
}

impl OptionKey {
    pub fn new(section: impl Into<String>, option: &str) -> Self {
        Self {
            section: section.into(),
            option: normalize_option(option),
        }
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn option(&self) -> &str {
        &self.option
    }
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.section, self.option)
    }
}

/// How to obtain a value that is missing from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionPolicy {
    /// Text shown when prompting the user
    pub prompt: String,
    /// Ask before writing the answer to the store
    pub ask_before_persist: bool,
    /// Read the answer without echoing it
    pub is_secret: bool,
}

impl OptionPolicy {
    /// Plain prompt, persisted without asking
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ask_before_persist: false,
            is_secret: false,
        }
    }

    pub fn ask_before_persist(mut self) -> Self {
        self.ask_before_persist = true;
        self
    }

    pub fn secret(mut self) -> Self {
        self.is_secret = true;
        self
    }
}

impl From<&KnownOption> for OptionPolicy {
    fn from(known: &KnownOption) -> Self {
        Self {
            prompt: known.prompt.to_string(),
            ask_before_persist: known.ask,
            is_secret: known.secret,
        }
    }
}

/// Mapping from (section, option) to its [`OptionPolicy`].
#[derive(Debug, Clone, Default)]
pub struct OptionRegistry {
    entries: BTreeMap<OptionKey, OptionPolicy>,
}

impl OptionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a static table of known options
    pub fn from_known(known: &[KnownOption]) -> Self {
        known.iter().fold(Self::new(), |registry, k| {
            registry.with(k.section, k.option, OptionPolicy::from(k))
        })
    }

    /// Register a key. A later registration of the same key replaces the
    /// earlier one.
    pub fn register(&mut self, section: &str, option: &str, policy: OptionPolicy) -> &mut Self {
        self.entries.insert(OptionKey::new(section, option), policy);
        self
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, section: &str, option: &str, policy: OptionPolicy) -> Self {
        self.register(section, option, policy);
        self
    }

    pub fn lookup(&self, section: &str, option: &str) -> Option<&OptionPolicy> {
        self.entries.get(&OptionKey::new(section, option))
    }

    pub fn contains(&self, section: &str, option: &str) -> bool {
        self.lookup(section, option).is_some()
    }

    /// Iterate over all entries, ordered by section then option
    pub fn iter(&self) -> impl Iterator<Item = (&OptionKey, &OptionPolicy)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_lookup() {
        let registry = OptionRegistry::new().with(
            "General",
            "token",
            OptionPolicy::new("API token").ask_before_persist().secret(),
        );

        let policy = registry.lookup("General", "token").unwrap();
        assert_eq!(policy.prompt, "API token");
        assert!(policy.ask_before_persist);
        assert!(policy.is_secret);
        assert!(registry.lookup("General", "missing").is_none());
        assert!(registry.lookup("general", "token").is_none());
    }

    #[test]
    fn test_lookup_normalizes_option() {
        let registry = OptionRegistry::new().with("Imgur", "Client_ID", OptionPolicy::new("id"));
        assert!(registry.contains("Imgur", "client_id"));
        assert!(registry.contains("Imgur", "CLIENT_ID"));
    }

    #[test]
    fn test_last_registration_wins() {
        let mut registry = OptionRegistry::new();
        registry
            .register("S", "o", OptionPolicy::new("first"))
            .register("S", "o", OptionPolicy::new("second").secret());

        assert_eq!(registry.len(), 1);
        let policy = registry.lookup("S", "o").unwrap();
        assert_eq!(policy.prompt, "second");
        assert!(policy.is_secret);
    }

    #[test]
    fn test_iter_is_ordered() {
        let registry = OptionRegistry::new()
            .with("Tracker", "username", OptionPolicy::new("u"))
            .with("General", "token", OptionPolicy::new("t"));
        let keys: Vec<String> = registry.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["General.token", "Tracker.username"]);
    }

    #[test]
    fn test_default_policy_persists_without_asking() {
        let policy = OptionPolicy::new("Username");
        assert!(!policy.ask_before_persist);
        assert!(!policy.is_secret);
    }
}
