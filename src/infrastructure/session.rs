//! File-backed session store.
//!
//! Holds the serialized current-user record (`role`, `email`) between
//! runs. Login itself happens elsewhere; this client only reads the
//! record and, when asked from the CLI, seeds it.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::warn;

use super::config::storage::ConfigError;
use crate::domain::entities::SessionUser;
use crate::domain::errors::SessionError;
use crate::domain::ports::SessionStorePort;

const SESSION_FILE_NAME: &str = "session.toml";

/// Session store persisting to `session.toml` in the config directory.
pub struct FileSessionStore {
    session_path: Option<PathBuf>,
}

impl FileSessionStore {
    /// Creates a session store in the default config directory.
    ///
    /// If project directories cannot be determined, persistence is
    /// disabled and a warning is logged.
    #[must_use]
    pub fn new() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("com", "billfold", "billfold") {
            Self {
                session_path: Some(proj_dirs.config_dir().join(SESSION_FILE_NAME)),
            }
        } else {
            warn!("Failed to determine project directories. Session persistence disabled.");
            Self { session_path: None }
        }
    }

    /// Creates a session store rooted at a specific directory (useful for testing).
    #[must_use]
    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            session_path: Some(dir.join(SESSION_FILE_NAME)),
        }
    }
}

impl Default for FileSessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStorePort for FileSessionStore {
    fn load(&self) -> Result<Option<SessionUser>, SessionError> {
        let Some(path) = &self.session_path else {
            return Ok(None);
        };

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        match toml::from_str(&content) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!(error = %e, "Failed to parse session file. Ignoring it.");
                Ok(None)
            }
        }
    }

    fn store(&self, session: &SessionUser) -> Result<(), SessionError> {
        let Some(path) = &self.session_path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        super::config::StorageManager::save_to_file(path, session).map_err(|e| match e {
            ConfigError::Io(io) => SessionError::Io(io),
            ConfigError::TomlSer(ser) => SessionError::TomlSer(ser),
            ConfigError::TomlDe(de) => SessionError::TomlDe(de),
            ConfigError::ConfigDirNotFound => SessionError::DirNotFound,
        })
    }

    fn clear(&self) -> Result<(), SessionError> {
        let Some(path) = &self.session_path else {
            return Ok(());
        };

        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserRole;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_session_returns_none() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::with_dir(dir.path().to_path_buf());

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_store_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::with_dir(dir.path().to_path_buf());
        let session = SessionUser::new(UserRole::Employee, "employee@test.tld");

        store.store(&session).unwrap();

        assert_eq!(store.load().unwrap(), Some(session));
    }

    #[test]
    fn test_corrupt_session_file_is_ignored() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::with_dir(dir.path().to_path_buf());
        fs::write(dir.path().join(SESSION_FILE_NAME), "role = [").unwrap();

        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_clear_removes_session() {
        let dir = tempdir().unwrap();
        let store = FileSessionStore::with_dir(dir.path().to_path_buf());
        let session = SessionUser::new(UserRole::Admin, "admin@test.tld");

        store.store(&session).unwrap();
        store.clear().unwrap();

        assert_eq!(store.load().unwrap(), None);
        assert!(!dir.path().join(SESSION_FILE_NAME).exists());
    }
}
