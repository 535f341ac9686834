//! Options registered by the bundled subsystems.
//!
//! Defines the prompt text and persistence policy for every configuration
//! key the tool knows how to ask for. Used to assemble the
//! [`OptionRegistry`](super::OptionRegistry) at startup.

/// Static registration for a single option.
#[derive(Debug, Clone, Copy)]
pub struct KnownOption {
    pub section: &'static str,
    pub option: &'static str,
    /// Prompt text shown to the user
    pub prompt: &'static str,
    /// Ask before persisting the answer
    pub ask: bool,
    /// Read the answer without echo
    pub secret: bool,
}

/// All known options with their policies.
pub fn known_options() -> &'static [KnownOption] {
    &KNOWN_OPTIONS
}

static KNOWN_OPTIONS: [KnownOption; 5] = [
    KnownOption {
        section: "General",
        option: "token",
        prompt: "API token",
        ask: true,
        secret: true,
    },
    KnownOption {
        section: "Tracker",
        option: "username",
        prompt: "Tracker username",
        ask: false,
        secret: false,
    },
    KnownOption {
        section: "Tracker",
        option: "password",
        prompt: "Tracker password",
        ask: true,
        secret: true,
    },
    KnownOption {
        section: "Tmdb",
        option: "api_key",
        prompt: "TMDB API key",
        ask: true,
        secret: false,
    },
    KnownOption {
        section: "Imgur",
        option: "client_id",
        prompt: "Imgur API client ID",
        ask: true,
        secret: false,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::OptionRegistry;

    #[test]
    fn test_known_options_not_empty() {
        assert!(!known_options().is_empty());
    }

    #[test]
    fn test_tracker_password_policy() {
        let registry = OptionRegistry::from_known(known_options());
        let policy = registry.lookup("Tracker", "password").unwrap();
        assert!(policy.ask_before_persist);
        assert!(policy.is_secret);
        assert!(registry.lookup("Tracker", "nonexistent").is_none());
    }

    #[test]
    fn test_secret_options_always_ask() {
        for known in known_options().iter().filter(|k| k.secret) {
            assert!(known.ask, "{}.{} is secret but persisted silently", known.section, known.option);
        }
    }

    #[test]
    fn test_registry_from_known() {
        let registry = OptionRegistry::from_known(known_options());
        assert_eq!(registry.len(), known_options().len());
        assert!(registry.lookup("Imgur", "client_id").unwrap().ask_before_persist);
    }
}
