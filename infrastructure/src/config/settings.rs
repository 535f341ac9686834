//! Settings for the tool itself
//!
//! These control where the store lives and whether prompting is allowed.
//! They are not stored in the configuration store; they come from built-in
//! defaults and `CONFKEEP_*` environment variables.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Process-level settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Store location override (`CONFKEEP_CONFIG_PATH`)
    pub config_path: Option<PathBuf>,
    /// Allow interactive prompts (`CONFKEEP_INTERACTIVE`)
    pub interactive: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: None,
            interactive: true,
        }
    }
}
