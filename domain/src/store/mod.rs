//! Stored configuration data.
//!
//! A [`ConfigDocument`] is the in-memory image of the persistent store: an
//! ordered list of [`Section`]s, each holding option → [`StoredValue`]
//! entries. Reading an entry yields a three-way [`Lookup`] so callers can
//! tell a confidential entry apart from a missing one.

mod document;
mod value;

pub use document::{ConfigDocument, Section, normalize_option};
pub use value::{Lookup, StoredValue};
