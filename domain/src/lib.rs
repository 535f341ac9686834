//! Domain layer for confkeep
//!
//! This crate contains the configuration data model and the per-key
//! resolution policy. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Store
//!
//! The persistent store is a set of named sections holding option → value
//! entries. An entry is either a concrete value or the *confidential
//! sentinel*: a key that is present but deliberately value-less, meaning
//! "always ask, never store".
//!
//! ## Registry
//!
//! Each configuration key the tool may need is registered once at startup
//! with a prompt text and a persistence policy. The registry decides how a
//! missing value is obtained.
//!
//! ## Schema Version
//!
//! The store records its schema version under `General.version`; the
//! migration engine upgrades older stores step by step.

pub mod core;
pub mod registry;
pub mod schema;
pub mod store;

// Re-export commonly used types
pub use core::error::DomainError;
pub use registry::{KnownOption, OptionKey, OptionPolicy, OptionRegistry, known_options};
pub use schema::{CURRENT_SCHEMA_VERSION, SchemaVersion, VERSION_OPTION, VERSION_SECTION};
pub use store::{ConfigDocument, Lookup, Section, StoredValue};
