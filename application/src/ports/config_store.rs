//! Persistent store port.
//!
//! The store is an opaque durable key-value document. The application only
//! relies on "section exists / option exists / value-or-absent" semantics;
//! the file format and permission handling belong to the adapter.
//!
//! # Built-in Implementations
//!
//! - [`InMemoryConfigStore`] - keeps a simulated on-disk copy in memory, used
//!   by tests and dry runs
//!
//! For the file-backed store, see `FileConfigStore` in the infrastructure
//! layer.

use chrono::{Local, NaiveDateTime};
use confkeep_domain::{ConfigDocument, DomainError, Lookup, StoredValue};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by a store adapter.
///
/// These are not translated by the resolver; they reach the caller as-is.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config {} at line {line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Invalid(#[from] DomainError),
}

impl StoreError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Timestamp format used in backup file names
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S";

/// Build the backup path for a store location:
/// `<original-path>.<timestamp>.bak`.
pub fn backup_path(location: &Path, at: NaiveDateTime) -> PathBuf {
    let mut name = OsString::from(location.as_os_str());
    name.push(format!(".{}.bak", at.format(BACKUP_TIMESTAMP_FORMAT)));
    PathBuf::from(name)
}

/// Port for the persistent configuration store.
///
/// Adapters hold the in-memory [`ConfigDocument`] and know how to load it
/// from and flush it to durable storage. Mutations through [`set`] and
/// [`remove_section`] flush immediately.
///
/// [`set`]: ConfigStorePort::set
/// [`remove_section`]: ConfigStorePort::remove_section
pub trait ConfigStorePort {
    /// Where the store lives on durable storage
    fn location(&self) -> &Path;

    /// The current in-memory document
    fn document(&self) -> &ConfigDocument;

    fn document_mut(&mut self) -> &mut ConfigDocument;

    /// Replace the in-memory document with the durable content.
    ///
    /// A store that does not exist yet reloads as an empty document.
    fn reload(&mut self) -> Result<(), StoreError>;

    /// Flush the whole document to durable storage, readable by the owner
    /// only.
    fn save(&mut self) -> Result<(), StoreError>;

    /// Copy the durable content to a timestamped sibling and return its path.
    fn backup(&mut self) -> Result<PathBuf, StoreError>;

    /// Read a single entry from the in-memory document
    fn lookup(&self, section: &str, option: &str) -> Lookup {
        self.document().lookup(section, option)
    }

    /// Write a single entry and flush.
    fn set(&mut self, section: &str, option: &str, value: StoredValue) -> Result<(), StoreError> {
        self.document_mut().set(section, option, value)?;
        self.save()
    }

    /// Remove a whole section and flush.
    ///
    /// Returns `false` (and writes nothing) if the section did not exist.
    fn remove_section(&mut self, section: &str) -> Result<bool, StoreError> {
        if !self.document_mut().remove_section(section) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }
}

/// Store that keeps its "durable" copy in memory.
///
/// `persisted` plays the role of the file: [`save`](ConfigStorePort::save)
/// copies the working document into it and
/// [`reload`](ConfigStorePort::reload) copies it back. Backups are recorded
/// instead of written.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConfigStore {
    location: PathBuf,
    working: ConfigDocument,
    persisted: ConfigDocument,
    backups: Vec<(PathBuf, ConfigDocument)>,
    save_count: usize,
}

impl InMemoryConfigStore {
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
            ..Self::default()
        }
    }

    /// Seed the simulated durable content
    pub fn with_persisted(mut self, document: ConfigDocument) -> Self {
        self.working = document.clone();
        self.persisted = document;
        self
    }

    /// The simulated durable content
    pub fn persisted(&self) -> &ConfigDocument {
        &self.persisted
    }

    /// Mutate the durable content directly, as another writer would
    pub fn persisted_mut(&mut self) -> &mut ConfigDocument {
        &mut self.persisted
    }

    /// Backups taken so far, with the content they captured
    pub fn backups(&self) -> &[(PathBuf, ConfigDocument)] {
        &self.backups
    }

    /// Number of flushes performed
    pub fn save_count(&self) -> usize {
        self.save_count
    }
}

impl ConfigStorePort for InMemoryConfigStore {
    fn location(&self) -> &Path {
        &self.location
    }

    fn document(&self) -> &ConfigDocument {
        &self.working
    }

    fn document_mut(&mut self) -> &mut ConfigDocument {
        &mut self.working
    }

    fn reload(&mut self) -> Result<(), StoreError> {
        self.working = self.persisted.clone();
        Ok(())
    }

    fn save(&mut self) -> Result<(), StoreError> {
        self.persisted = self.working.clone();
        self.save_count += 1;
        Ok(())
    }

    fn backup(&mut self) -> Result<PathBuf, StoreError> {
        let path = backup_path(&self.location, Local::now().naive_local());
        self.backups.push((path.clone(), self.persisted.clone()));
        Ok(path)
    }
}
