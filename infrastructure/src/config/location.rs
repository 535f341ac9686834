//! Secure storage location for the configuration store
//!
//! The store lives at `<config dir>/confkeep/confkeep.cfg`, where the
//! config dir is `$XDG_CONFIG_HOME` (or `~/.config`) on Linux and the
//! platform equivalent elsewhere. The containing directory is created
//! owner-only (0700) when missing.

use confkeep_application::StoreError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[cfg(unix)]
use std::os::unix::fs::DirBuilderExt;

/// Application directory and file stem
pub const APP_NAME: &str = "confkeep";

/// Mode for a newly created store directory
#[cfg(unix)]
pub const PRIVATE_DIR_MODE: u32 = 0o700;

/// Resolves and prepares the store location
pub struct StorageLocation;

impl StorageLocation {
    /// The per-user default store path.
    ///
    /// Returns `None` when the platform has no per-user config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_NAME).join(format!("{APP_NAME}.cfg")))
    }

    /// Pick the explicit path if given, otherwise the default one
    pub fn resolve(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(Self::default_path)
    }

    /// Create the directory that will hold `path`, owner-only, if absent.
    ///
    /// An existing directory is left as it is.
    pub fn prepare(path: &Path) -> Result<(), StoreError> {
        let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) else {
            return Ok(());
        };
        if dir.exists() {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(PRIVATE_DIR_MODE);
        builder.create(dir).map_err(|e| StoreError::io(dir, e))?;

        debug!(dir = %dir.display(), "Created config directory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_path_contains_app_name() {
        // Should return a path (even if file doesn't exist)
        if let Some(path) = StorageLocation::default_path() {
            assert!(path.ends_with("confkeep/confkeep.cfg"));
        }
    }

    #[test]
    fn test_explicit_path_wins() {
        let explicit = PathBuf::from("/tmp/custom.cfg");
        assert_eq!(
            StorageLocation::resolve(Some(explicit.as_path())),
            Some(explicit.clone())
        );
    }

    #[test]
    fn test_prepare_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("confkeep").join("confkeep.cfg");

        StorageLocation::prepare(&path).unwrap();

        let created = path.parent().unwrap();
        assert!(created.is_dir());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(created).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o700);
        }
    }

    #[test]
    fn test_prepare_accepts_bare_file_name() {
        StorageLocation::prepare(Path::new("confkeep.cfg")).unwrap();
    }
}
