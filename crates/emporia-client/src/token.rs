//! Durable session-token storage.
//!
//! The session token lives OUTSIDE the auth container, in durable client
//! storage under a fixed key, so a restarted process can restore its session
//! with a profile fetch. [`FileTokenStore`] is the production implementation;
//! [`MemoryTokenStore`] backs tests.

use emporia_core::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::EmporiaConfig;

/// Fixed filename for the stored session token.
const TOKEN_FILE: &str = "session.token";

/// Durable storage for the admin session token.
pub trait TokenStore: Send + Sync {
    /// Read the stored token, if any.
    fn load(&self) -> Result<Option<String>>;

    /// Persist the token, replacing any previous one.
    fn save(&self, token: &str) -> Result<()>;

    /// Remove the stored token. Removing an absent token is not an error.
    fn clear(&self) -> Result<()>;
}

/// File-backed token store.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Create a store inside the given directory, under the fixed filename.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(TOKEN_FILE))
    }

    /// Create a store at the location the configuration names.
    ///
    /// Uses `auth.token_path` when set, otherwise the XDG default. Errors
    /// only when neither is available (no explicit path and no resolvable
    /// config directory).
    pub fn from_config(config: &EmporiaConfig) -> Result<Self> {
        match &config.auth.token_path {
            Some(path) => Ok(Self::new(path)),
            None => Self::default_path()
                .map(Self::new)
                .ok_or_else(|| Error::config("no token path configured and no config dir")),
        }
    }

    /// XDG default location: `~/.config/emporia/session.token`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("emporia").join(TOKEN_FILE))
    }

    /// The file this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim().to_string();
                Ok(if token.is_empty() { None } else { Some(token) })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::Io(e)),
        }
    }
}

/// In-memory token store for tests.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a token, as if left by a previous
    /// session.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            slot: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self
            .slot
            .lock()
            .map_err(|_| Error::config("token store poisoned"))?
            .clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self
            .slot
            .lock()
            .map_err(|_| Error::config("token store poisoned"))? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self
            .slot
            .lock()
            .map_err(|_| Error::config("token store poisoned"))? = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::in_dir(dir.path());

        assert_eq!(store.load().unwrap(), None);
        store.save("abc123").unwrap();
        assert_eq!(store.load().unwrap(), Some("abc123".to_string()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_file_store_clear_absent_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::in_dir(dir.path());
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested/deeper").join(TOKEN_FILE));
        store.save("tok").unwrap();
        assert_eq!(store.load().unwrap(), Some("tok".to_string()));
    }

    #[test]
    fn test_file_store_blank_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::in_dir(dir.path());
        std::fs::write(store.path(), "  \n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_from_config_uses_explicit_path() {
        let mut config = EmporiaConfig::default();
        config.auth.token_path = Some("/tmp/emporia-test/session.token".to_string());
        let store = FileTokenStore::from_config(&config).unwrap();
        assert_eq!(
            store.path(),
            Path::new("/tmp/emporia-test/session.token")
        );
    }

    #[test]
    fn test_from_config_falls_back_to_default_path() {
        let config = EmporiaConfig::default();
        if let Some(default) = FileTokenStore::default_path() {
            let store = FileTokenStore::from_config(&config).unwrap();
            assert_eq!(store.path(), default.as_path());
        }
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryTokenStore::with_token("seed");
        assert_eq!(store.load().unwrap(), Some("seed".to_string()));
        store.save("next").unwrap();
        assert_eq!(store.load().unwrap(), Some("next".to_string()));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
