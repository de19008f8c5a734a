//! Connection configuration for [`SqliteStore`](crate::SqliteStore).
//!
//! A [`StoreConfig`] is an explicit value handed to `SqliteStore::open`.
//! It can be built in code or deserialized from JSON:
//!
//! ```json
//! { "path": "quotes.db", "mode": "read_write_create", "busy_timeout_ms": 500 }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::OpenFlags;
use serde::Deserialize;

use crate::error::StorageError;

/// How the database file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenMode {
    /// Open an existing file for reading only.
    ReadOnly,
    /// Open for reading and writing, creating the file if missing.
    #[default]
    ReadWriteCreate,
}

impl OpenMode {
    pub fn is_writable(self) -> bool {
        matches!(self, OpenMode::ReadWriteCreate)
    }

    pub(crate) fn flags(self) -> OpenFlags {
        let base = OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        match self {
            OpenMode::ReadOnly => base | OpenFlags::SQLITE_OPEN_READ_ONLY,
            OpenMode::ReadWriteCreate => {
                base | OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE
            }
        }
    }
}

/// Parameters for opening a store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Database file path, or `:memory:`.
    pub path: PathBuf,
    #[serde(default)]
    pub mode: OpenMode,
    /// How long a statement waits on a locked database before failing.
    /// Zero fails immediately.
    #[serde(default)]
    pub busy_timeout_ms: u64,
    /// SQLite VFS name; the default VFS when unset.
    #[serde(default)]
    pub vfs: Option<String>,
}

impl StoreConfig {
    /// Read-write-create configuration for `path` with no busy timeout.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoreConfig {
            path: path.into(),
            mode: OpenMode::ReadWriteCreate,
            busy_timeout_ms: 0,
            vfs: None,
        }
    }

    pub fn read_only(path: impl Into<PathBuf>) -> Self {
        StoreConfig::new(path).with_mode(OpenMode::ReadOnly)
    }

    pub fn in_memory() -> Self {
        StoreConfig::new(":memory:")
    }

    pub fn with_mode(mut self, mode: OpenMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_vfs(mut self, vfs: impl Into<String>) -> Self {
        self.vfs = Some(vfs.into());
        self
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    pub fn from_json_str(json: &str) -> Result<Self, StorageError> {
        let config: StoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Checks that the path can name a database file.
    pub fn validate(&self) -> Result<(), StorageError> {
        if self.path.as_os_str().is_empty() {
            return Err(StorageError::Config("store path is empty".to_string()));
        }
        if self.path.is_dir() {
            return Err(StorageError::Config(format!(
                "store path '{}' is a directory",
                self.path.display()
            )));
        }
        if matches!(self.vfs.as_deref(), Some("")) {
            return Err(StorageError::Config("vfs name is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = StoreConfig::new("a.db");
        assert_eq!(config.mode, OpenMode::ReadWriteCreate);
        assert_eq!(config.busy_timeout(), Duration::ZERO);
        assert!(config.vfs.is_none());
        assert!(config.mode.is_writable());
        assert!(!StoreConfig::read_only("a.db").mode.is_writable());
    }

    #[test]
    fn builder_setters() {
        let config = StoreConfig::new("a.db")
            .with_busy_timeout(Duration::from_millis(250))
            .with_vfs("unix-none");
        assert_eq!(config.busy_timeout_ms, 250);
        assert_eq!(config.vfs.as_deref(), Some("unix-none"));
    }

    #[test]
    fn from_json_with_defaults() {
        let config = StoreConfig::from_json_str(r#"{ "path": "quotes.db" }"#).unwrap();
        assert_eq!(config, StoreConfig::new("quotes.db"));
    }

    #[test]
    fn from_json_full() {
        let config = StoreConfig::from_json_str(
            r#"{ "path": "quotes.db", "mode": "read_only", "busy_timeout_ms": 500, "vfs": "unix" }"#,
        )
        .unwrap();
        assert_eq!(config.mode, OpenMode::ReadOnly);
        assert_eq!(config.busy_timeout_ms, 500);
        assert_eq!(config.vfs.as_deref(), Some("unix"));
    }

    #[test]
    fn from_json_rejects_unknown_mode() {
        let err = StoreConfig::from_json_str(r#"{ "path": "a.db", "mode": "append" }"#).unwrap_err();
        assert!(matches!(err, StorageError::ConfigParse(_)));
    }

    #[test]
    fn directory_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = StoreConfig::new(dir.path()).validate().unwrap_err();
        assert!(matches!(err, StorageError::Config(_)));
    }

    #[test]
    fn from_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("store.json");
        std::fs::write(&file, r#"{ "path": "x.db", "busy_timeout_ms": 10 }"#).unwrap();
        let config = StoreConfig::from_json_file(&file).unwrap();
        assert_eq!(config.busy_timeout_ms, 10);

        let missing = StoreConfig::from_json_file(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(missing, StorageError::Io(_)));
    }
}
