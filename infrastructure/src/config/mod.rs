//! Configuration storage for confkeep
//!
//! - [`FileConfigStore`]: the persistent store, one file in a
//!   section-delimited key/value format ([`ini_format`])
//! - [`StorageLocation`]: where that file lives, and its private directory
//! - [`SettingsLoader`]: settings for the tool itself, merged from defaults
//!   and `CONFKEEP_*` environment variables

mod file_store;
pub mod ini_format;
mod loader;
mod location;
mod settings;

pub use file_store::{FileConfigStore, write_private};
pub use loader::{ENV_PREFIX, SettingsLoader};
pub use location::{APP_NAME, StorageLocation};
pub use settings::Settings;
