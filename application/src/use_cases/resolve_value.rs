//! Value resolution use case
//!
//! [`ValueResolver`] is the single read/write path to the configuration
//! store once startup migration is done.
//!
//! # Resolution
//!
//! ```text
//! reload store from disk
//!        ↓
//! lookup (section, option)
//!        ├─ Found(v) ──────────────→ return v
//!        ├─ MissingAbsent ───┐
//!        └─ MissingConfidential ─┤ (remember)
//!                                ↓
//! caller default? ───────────────→ return default
//!        ↓
//! registry entry? ── no ─────────→ UnregisteredOption
//!        ↓
//! prompt (masked if secret)
//!        ↓
//! confidential? ─────────────────→ return value, never persist
//!        ↓
//! ask_before_persist? ── y ─→ [Y/n/nr]
//!        ↓                     ├─ n  → return value
//!        ↓                     └─ nr → store sentinel, return value
//! set + flush ───────────────────→ return value
//! ```

use crate::ports::config_store::{ConfigStorePort, StoreError};
use crate::ports::prompt::{PersistChoice, PromptError, PromptPort};
use confkeep_domain::{Lookup, OptionRegistry, StoredValue};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while resolving a value.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// No stored value, no caller default and no registry entry.
    ///
    /// This is a wiring mistake in the calling code, not a user input
    /// problem.
    #[error("Unregistered option {section}.{option}")]
    UnregisteredOption { section: String, option: String },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Prompt error: {0}")]
    Prompt(#[from] PromptError),
}

impl ResolveError {
    pub fn is_unregistered(&self) -> bool {
        matches!(self, ResolveError::UnregisteredOption { .. })
    }
}

/// Resolves configuration values from the store, falling back to the user.
///
/// The registry is injected at construction and only readable afterwards.
pub struct ValueResolver<S, P> {
    store: S,
    prompt: P,
    registry: OptionRegistry,
}

impl<S: ConfigStorePort, P: PromptPort> ValueResolver<S, P> {
    pub fn new(store: S, prompt: P, registry: OptionRegistry) -> Self {
        Self {
            store,
            prompt,
            registry,
        }
    }

    /// Resolve a value, prompting the user if the store has none.
    pub fn get(&mut self, section: &str, option: &str) -> Result<String, ResolveError> {
        self.resolve(section, option, None)
    }

    /// Resolve a value, returning `default` instead of prompting on a miss.
    pub fn get_or(
        &mut self,
        section: &str,
        option: &str,
        default: &str,
    ) -> Result<String, ResolveError> {
        self.resolve(section, option, Some(default))
    }

    /// Resolve a value.
    ///
    /// The store is reloaded before the read. A confidential entry is a miss
    /// whose answer is never persisted and never offered for saving.
    pub fn resolve(
        &mut self,
        section: &str,
        option: &str,
        default: Option<&str>,
    ) -> Result<String, ResolveError> {
        self.store.reload()?;

        let confidential = match self.store.lookup(section, option) {
            Lookup::Found(value) => {
                debug!(section, option, "Resolved from store");
                return Ok(value);
            }
            Lookup::MissingConfidential => true,
            Lookup::MissingAbsent => false,
        };

        if let Some(default) = default {
            debug!(section, option, confidential, "Using caller default");
            return Ok(default.to_string());
        }

        let policy = self.registry.lookup(section, option).ok_or_else(|| {
            ResolveError::UnregisteredOption {
                section: section.to_string(),
                option: option.to_string(),
            }
        })?;

        debug!(
            section,
            option,
            secret = policy.is_secret,
            confidential,
            "Prompting for missing value"
        );
        let value = if policy.is_secret {
            self.prompt.prompt_secret(&policy.prompt)?
        } else {
            self.prompt.prompt(&policy.prompt)?.trim().to_string()
        };

        if confidential {
            return Ok(value);
        }

        if policy.ask_before_persist {
            match self.prompt.confirm_persist(self.store.location())? {
                PersistChoice::Save => {}
                PersistChoice::Skip => {
                    debug!(section, option, "User declined to save value");
                    return Ok(value);
                }
                PersistChoice::SkipAndRemember => {
                    debug!(section, option, "User declined to save value permanently");
                    self.forget(section, option)?;
                    return Ok(value);
                }
            }
        }

        self.set(section, option, &value)?;
        Ok(value)
    }

    /// Write a value and flush the store.
    pub fn set(&mut self, section: &str, option: &str, value: &str) -> Result<(), ResolveError> {
        self.store.set(section, option, StoredValue::value(value))?;
        debug!(section, option, "Stored value");
        Ok(())
    }

    /// Mark an option confidential: always ask, never store.
    pub fn forget(&mut self, section: &str, option: &str) -> Result<(), ResolveError> {
        self.store.set(section, option, StoredValue::Confidential)?;
        debug!(section, option, "Stored confidential marker");
        Ok(())
    }

    /// Remove a section and flush. Returns `false` if it did not exist.
    pub fn remove_section(&mut self, section: &str) -> Result<bool, ResolveError> {
        self.store.reload()?;
        Ok(self.store.remove_section(section)?)
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn prompter(&self) -> &P {
        &self.prompt
    }
}
