//! Schema migration use case
//!
//! Brings the store up to the latest schema version known to a
//! [`MigrationTable`]. Run once at startup, before anything else reads the
//! store.
//!
//! # Flow
//!
//! ```text
//! read General.version (default 0)
//!        ↓
//! step registered? ── no ──→ done (no backup, no writes)
//!        ↓
//! back up store once
//!        ↓
//! ┌→ read version
//! │      ↓
//! │  step registered? ── no ──→ done
//! │      ↓
//! │  apply step to store
//! │      ↓
//! └─ write step target as version
//! ```
//!
//! The version is written only after a step succeeds, so a failed run
//! resumes from the last completed step. There is no automatic rollback;
//! the backup is the recovery path.

use crate::ports::config_store::{ConfigStorePort, StoreError};
use crate::ports::prompt::PromptPort;
use crate::use_cases::resolve_value::{ResolveError, ValueResolver};
use confkeep_domain::{DomainError, SchemaVersion, VERSION_OPTION, VERSION_SECTION};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

/// A migration function: an arbitrary mutation over the store.
///
/// Steps flush their own changes; the engine writes the new version after
/// the step returns.
pub type MigrationFn = fn(&mut dyn ConfigStorePort) -> Result<(), StoreError>;

/// Errors that can occur while building a table or migrating.
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Invalid stored schema version: {0}")]
    InvalidVersion(#[from] DomainError),

    #[error("Migration step {from} -> {to} does not increase the version")]
    NonIncreasingStep {
        from: SchemaVersion,
        to: SchemaVersion,
    },

    #[error("Duplicate migration step registered for version {0}")]
    DuplicateStep(SchemaVersion),

    #[error("Failed to back up config: {0}")]
    Backup(#[source] StoreError),

    #[error("Migration '{name}' failed: {source}")]
    Step {
        name: &'static str,
        #[source]
        source: StoreError,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

/// One link of the migration chain.
#[derive(Clone, Copy)]
pub struct MigrationStep {
    pub from: SchemaVersion,
    pub to: SchemaVersion,
    /// Short name used in logs and reports
    pub name: &'static str,
    pub apply: MigrationFn,
}

impl MigrationStep {
    pub fn new(from: u32, to: u32, name: &'static str, apply: MigrationFn) -> Self {
        Self {
            from: SchemaVersion::new(from),
            to: SchemaVersion::new(to),
            name,
            apply,
        }
    }
}

impl std::fmt::Debug for MigrationStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MigrationStep")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Steps keyed by source version.
///
/// Every step strictly increases the version and each source version has at
/// most one step, so walking the table always terminates.
#[derive(Debug, Clone, Default)]
pub struct MigrationTable {
    steps: BTreeMap<SchemaVersion, MigrationStep>,
}

impl MigrationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step, rejecting non-increasing and duplicate steps.
    pub fn with_step(mut self, step: MigrationStep) -> Result<Self, MigrationError> {
        if step.to <= step.from {
            return Err(MigrationError::NonIncreasingStep {
                from: step.from,
                to: step.to,
            });
        }
        if self.steps.contains_key(&step.from) {
            return Err(MigrationError::DuplicateStep(step.from));
        }
        self.steps.insert(step.from, step);
        Ok(self)
    }

    pub fn step_for(&self, version: SchemaVersion) -> Option<&MigrationStep> {
        self.steps.get(&version)
    }

    /// The version reached by walking the chain from `version`
    pub fn latest_from(&self, version: SchemaVersion) -> SchemaVersion {
        let mut current = version;
        while let Some(step) = self.step_for(current) {
            current = step.to;
        }
        current
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// A step that ran during a migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedStep {
    pub from: SchemaVersion,
    pub to: SchemaVersion,
    pub name: String,
}

/// Outcome of a migration run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MigrationReport {
    pub from: SchemaVersion,
    pub to: SchemaVersion,
    /// Backup taken before the first step, if any step ran
    pub backup: Option<PathBuf>,
    pub applied: Vec<AppliedStep>,
}

impl MigrationReport {
    pub fn is_up_to_date(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Use case that upgrades the store's schema.
pub struct MigrateConfigUseCase {
    table: MigrationTable,
}

impl MigrateConfigUseCase {
    pub fn new(table: MigrationTable) -> Self {
        Self { table }
    }

    /// Run all applicable steps against the resolver's store.
    ///
    /// Errors from a step propagate without rollback; the stored version
    /// then names the last completed step.
    pub fn execute<S, P>(
        &self,
        resolver: &mut ValueResolver<S, P>,
    ) -> Result<MigrationReport, MigrationError>
    where
        S: ConfigStorePort,
        P: PromptPort,
    {
        let initial = Self::stored_version(resolver)?;

        if self.table.step_for(initial).is_none() {
            debug!(version = %initial, "Config schema is up to date");
            return Ok(MigrationReport {
                from: initial,
                to: initial,
                backup: None,
                applied: Vec::new(),
            });
        }

        let backup = resolver
            .store_mut()
            .backup()
            .map_err(MigrationError::Backup)?;
        info!("Old config backed up at {}", backup.display());

        let mut applied = Vec::new();
        let current = loop {
            let current = Self::stored_version(resolver)?;
            let Some(step) = self.table.step_for(current) else {
                break current;
            };

            info!("Migrating config from {} to {}", step.from, step.to);
            (step.apply)(resolver.store_mut()).map_err(|source| MigrationError::Step {
                name: step.name,
                source,
            })?;
            resolver.set(VERSION_SECTION, VERSION_OPTION, &step.to.to_string())?;

            applied.push(AppliedStep {
                from: step.from,
                to: step.to,
                name: step.name.to_string(),
            });
        };

        Ok(MigrationReport {
            from: initial,
            to: current,
            backup: Some(backup),
            applied,
        })
    }

    fn stored_version<S, P>(
        resolver: &mut ValueResolver<S, P>,
    ) -> Result<SchemaVersion, MigrationError>
    where
        S: ConfigStorePort,
        P: PromptPort,
    {
        let default = SchemaVersion::INITIAL.to_string();
        let raw = resolver.get_or(VERSION_SECTION, VERSION_OPTION, &default)?;
        Ok(raw.parse()?)
    }
}
