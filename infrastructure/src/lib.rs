//! Infrastructure layer for confkeep
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the file-backed configuration store, its
//! on-disk format, the secure storage location and the settings loader.

pub mod config;

// Re-export commonly used types
pub use config::{
    APP_NAME, FileConfigStore, Settings, SettingsLoader, StorageLocation, ini_format,
};
