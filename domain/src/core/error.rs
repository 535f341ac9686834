//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid schema version: {0:?}")]
    InvalidVersion(String),

    #[error("Invalid section name: {0:?}")]
    InvalidSectionName(String),

    #[error("Invalid option name: {0:?}")]
    InvalidOptionName(String),
}
