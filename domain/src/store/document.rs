//! In-memory configuration document

use super::value::{Lookup, StoredValue};
use crate::core::error::DomainError;

/// Normalize an option key.
///
/// Option keys are case-insensitive on disk, so they are stored and looked
/// up in lower case.
pub fn normalize_option(option: &str) -> String {
    option.trim().to_lowercase()
}

/// A named group of options.
///
/// Entries keep their insertion order so that a save/reload cycle does not
/// reshuffle a hand-edited file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    entries: Vec<(String, StoredValue)>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Iterate over `(option, value)` pairs in insertion order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &StoredValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get(&self, option: &str) -> Option<&StoredValue> {
        let key = normalize_option(option);
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, option: &str) -> bool {
        self.get(option).is_some()
    }

    /// Insert or overwrite an entry. The key must already be validated.
    fn set(&mut self, key: String, value: StoredValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Remove an option, returning its previous value
    pub fn remove(&mut self, option: &str) -> Option<StoredValue> {
        let key = normalize_option(option);
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full content of the configuration store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
    sections: Vec<Section>,
}

impl ConfigDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Get a section, creating it (empty) if it does not exist yet
    pub fn ensure_section(&mut self, name: &str) -> Result<&mut Section, DomainError> {
        validate_section_name(name)?;
        let index = match self.sections.iter().position(|s| s.name == name) {
            Some(index) => index,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        };
        Ok(&mut self.sections[index])
    }

    /// Remove a section and all its options.
    ///
    /// Returns `false` if the section did not exist.
    pub fn remove_section(&mut self, name: &str) -> bool {
        let before = self.sections.len();
        self.sections.retain(|s| s.name != name);
        self.sections.len() != before
    }

    /// Read a single entry
    pub fn lookup(&self, section: &str, option: &str) -> Lookup {
        Lookup::from(self.section(section).and_then(|s| s.get(option)))
    }

    /// Write a single entry, creating the section when needed
    pub fn set(
        &mut self,
        section: &str,
        option: &str,
        value: StoredValue,
    ) -> Result<(), DomainError> {
        let key = normalize_option(option);
        validate_option_name(&key)?;
        self.ensure_section(section)?.set(key, value);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

fn validate_section_name(name: &str) -> Result<(), DomainError> {
    let invalid = name.trim().is_empty()
        || name.trim() != name
        || name.contains(']')
        || name.contains(['\n', '\r']);
    if invalid {
        return Err(DomainError::InvalidSectionName(name.to_string()));
    }
    Ok(())
}

fn validate_option_name(key: &str) -> Result<(), DomainError> {
    let invalid = key.is_empty()
        || key.contains(['=', ':', '\n', '\r'])
        || key.starts_with(['[', '#', ';']);
    if invalid {
        return Err(DomainError::InvalidOptionName(key.to_string()));
    }
    Ok(())
}
