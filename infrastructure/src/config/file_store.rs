//! File-backed configuration store
//!
//! Implements [`ConfigStorePort`] over a single text file in the
//! [`ini_format`](super::ini_format). The file may hold secrets in plain
//! text, so every write (including backups) leaves it readable by the owner
//! only.

use super::ini_format;
use chrono::Local;
use confkeep_application::{ConfigStorePort, StoreError, backup_path};
use confkeep_domain::ConfigDocument;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

/// File mode for the store and its backups
#[cfg(unix)]
pub const PRIVATE_FILE_MODE: u32 = 0o600;

/// Configuration store persisted to a single file.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
    document: ConfigDocument,
}

impl FileConfigStore {
    /// Open the store at `path`, loading its current content.
    ///
    /// A missing file is an empty store; it is created on the first save.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self {
            path: path.into(),
            document: ConfigDocument::new(),
        };
        store.reload()?;
        Ok(store)
    }

    /// Read the raw file content, or `None` if the file does not exist
    fn read_durable(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

impl ConfigStorePort for FileConfigStore {
    fn location(&self) -> &Path {
        &self.path
    }

    fn document(&self) -> &ConfigDocument {
        &self.document
    }

    fn document_mut(&mut self) -> &mut ConfigDocument {
        &mut self.document
    }

    fn reload(&mut self) -> Result<(), StoreError> {
        self.document = match self.read_durable()? {
            Some(text) => ini_format::parse(&text).map_err(|e| StoreError::Parse {
                path: self.path.clone(),
                line: e.line,
                message: e.message,
            })?,
            None => ConfigDocument::new(),
        };
        trace!(path = %self.path.display(), "Reloaded config");
        Ok(())
    }

    fn save(&mut self) -> Result<(), StoreError> {
        write_private(&self.path, &ini_format::render(&self.document))?;
        debug!(path = %self.path.display(), "Saved config");
        Ok(())
    }

    fn backup(&mut self) -> Result<PathBuf, StoreError> {
        let target = backup_path(&self.path, Local::now().naive_local());
        let content = match self.read_durable()? {
            Some(text) => text,
            None => ini_format::render(&self.document),
        };
        write_private(&target, &content)?;
        Ok(target)
    }
}

/// Write `contents` to `path`, truncating it, with owner-only permissions.
///
/// The mode is applied to the open handle before any bytes are written, so
/// an existing file with looser permissions is tightened first.
pub fn write_private(path: &Path, contents: &str) -> Result<(), StoreError> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(PRIVATE_FILE_MODE);

    let mut file = options.open(path).map_err(|e| StoreError::io(path, e))?;
    #[cfg(unix)]
    file.set_permissions(fs::Permissions::from_mode(PRIVATE_FILE_MODE))
        .map_err(|e| StoreError::io(path, e))?;
    file.write_all(contents.as_bytes())
        .map_err(|e| StoreError::io(path, e))?;
    file.flush().map_err(|e| StoreError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use confkeep_application::{
        MigrateConfigUseCase, PromptCall, ScriptedPrompt, ValueResolver, default_migrations,
    };
    use confkeep_domain::{Lookup, OptionPolicy, OptionRegistry, StoredValue};
    use tempfile::tempdir;

    #[cfg(unix)]
    fn mode(path: &Path) -> u32 {
        fs::metadata(path).unwrap().permissions().mode() & 0o777
    }

    fn backups_in(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| p.to_string_lossy().ends_with(".bak"))
            .collect()
    }

    #[test]
    fn test_open_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::open(dir.path().join("confkeep.cfg")).unwrap();
        assert!(store.document().is_empty());
        assert!(!store.location().exists());
    }

    #[test]
    fn test_set_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("confkeep.cfg");
        let mut store = FileConfigStore::open(&path).unwrap();

        store
            .set("Tracker", "username", StoredValue::value("alice"))
            .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[Tracker]\nusername = alice\n\n");
    }

    #[test]
    fn test_set_then_get_returns_exact_value() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("confkeep.cfg");
        let mut resolver = ValueResolver::new(
            FileConfigStore::open(&path).unwrap(),
            ScriptedPrompt::default(),
            OptionRegistry::new(),
        );

        let values = [
            ("motd", "a\n\nb"),
            ("note", "x\n#y"),
            ("password", " pass "),
            ("plain", "one\ntwo"),
        ];
        for (option, value) in values {
            resolver.set("S", option, value).unwrap();
        }

        for (option, value) in values {
            assert_eq!(resolver.get("S", option).unwrap(), value);
        }
        let section = resolver.store().document().section("S").unwrap();
        assert_eq!(section.len(), values.len());

        // A later flush writes back the same values
        resolver.set("S", "extra", "1").unwrap();
        let reopened = FileConfigStore::open(&path).unwrap();
        for (option, value) in values {
            assert_eq!(reopened.lookup("S", option), Lookup::Found(value.into()));
        }
        assert!(resolver.prompter().calls().is_empty());
    }

    #[test]
    fn test_reload_sees_external_edits() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("confkeep.cfg");
        let mut store = FileConfigStore::open(&path).unwrap();
        fs::write(&path, "[General]\nversion = 3\n").unwrap();

        store.reload().unwrap();
        assert_eq!(store.lookup("General", "version"), Lookup::Found("3".into()));
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("confkeep.cfg");
        fs::write(&path, "[General\n").unwrap();

        let err = FileConfigStore::open(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 1, .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_restricts_permissions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("confkeep.cfg");
        fs::write(&path, "").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let mut store = FileConfigStore::open(&path).unwrap();
        store
            .set("General", "token", StoredValue::value("secret"))
            .unwrap();

        assert_eq!(mode(&path), 0o600);
    }

    #[test]
    fn test_backup_copies_disk_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("confkeep.cfg");
        fs::write(&path, "# hand written\n[Imgur]\nclient_id = abc\n").unwrap();
        let mut store = FileConfigStore::open(&path).unwrap();

        let backup = store.backup().unwrap();

        assert_eq!(backup.parent(), path.parent());
        let name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("confkeep.cfg."));
        assert!(name.ends_with(".bak"));
        assert_eq!(
            fs::read_to_string(&backup).unwrap(),
            "# hand written\n[Imgur]\nclient_id = abc\n"
        );
        #[cfg(unix)]
        assert_eq!(mode(&backup), 0o600);
    }

    #[test]
    fn test_migration_against_file_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("confkeep.cfg");
        fs::write(&path, "[Imgur]\nclient_id = stale\n\n[Tracker]\nusername = alice\n").unwrap();

        let registry =
            OptionRegistry::new().with("Imgur", "client_id", OptionPolicy::new("Imgur client ID"));
        let mut resolver = ValueResolver::new(
            FileConfigStore::open(&path).unwrap(),
            ScriptedPrompt::new(["fresh"]),
            registry,
        );
        let use_case = MigrateConfigUseCase::new(default_migrations().unwrap());

        let first = use_case.execute(&mut resolver).unwrap();
        let second = use_case.execute(&mut resolver).unwrap();

        assert_eq!(first.applied.len(), 1);
        assert!(second.is_up_to_date());

        let backups = backups_in(dir.path());
        assert_eq!(backups.len(), 1);
        assert!(fs::read_to_string(&backups[0]).unwrap().contains("[Imgur]"));

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "[Tracker]\nusername = alice\n\n[General]\nversion = 1\n\n"
        );

        assert_eq!(resolver.get("Imgur", "client_id").unwrap(), "fresh");
        assert_eq!(
            resolver.prompter().calls(),
            &[PromptCall::Plain("Imgur client ID".into())]
        );
    }

    #[test]
    fn test_decline_and_remember_never_writes_secret() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("confkeep.cfg");
        let registry = OptionRegistry::new().with(
            "General",
            "token",
            OptionPolicy::new("API token").ask_before_persist().secret(),
        );
        let mut resolver = ValueResolver::new(
            FileConfigStore::open(&path).unwrap(),
            ScriptedPrompt::new(["tok-1", "nr", "tok-2"]),
            registry,
        );

        assert_eq!(resolver.get("General", "token").unwrap(), "tok-1");
        assert_eq!(resolver.get("General", "token").unwrap(), "tok-2");

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "[General]\ntoken\n\n");
        assert!(!text.contains("tok-"));
        assert_eq!(
            resolver.prompter().calls(),
            &[
                PromptCall::Secret("API token".into()),
                PromptCall::Confirm(path.clone()),
                PromptCall::Secret("API token".into()),
            ]
        );
    }
}
