//! Session token storage
//!
//! One store per running client. It is cheap to clone and every clone
//! shares the same token, so it can be handed to whatever needs to read it.
//! The login path is the only writer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Opaque credential issued by the authentication service
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short form safe to put on screen
    pub fn redacted(&self) -> String {
        let prefix: String = self.0.chars().take(4).collect();
        format!("{prefix}…")
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access session file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session file {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// On-disk form of the session
#[derive(Debug, Serialize, Deserialize)]
struct PersistedSession {
    token: SessionToken,
    issued_at: DateTime<Utc>,
}

/// Process-wide holder for the session token
#[derive(Clone, Default)]
pub struct SessionStore {
    token: Arc<RwLock<Option<SessionToken>>>,
    path: Option<PathBuf>,
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .field("path", &self.path)
            .finish()
    }
}

impl SessionStore {
    /// Store that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Store backed by a JSON file, picking up any token a previous run left
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SessionError> {
        let path = path.into();
        let token = load(&path)?;
        if token.is_some() {
            tracing::debug!("Restored session from {}", path.display());
        }

        Ok(Self {
            token: Arc::new(RwLock::new(token)),
            path: Some(path),
        })
    }

    /// Replace the token unconditionally.
    ///
    /// The in-memory token is updated before persisting, so a write failure
    /// still leaves this process logged in.
    pub fn set(&self, token: SessionToken) -> Result<(), SessionError> {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.clone());
        tracing::debug!("Session token set");

        if let Some(path) = &self.path {
            save(
                path,
                &PersistedSession {
                    token,
                    issued_at: Utc::now(),
                },
            )?;
        }
        Ok(())
    }

    pub fn get(&self) -> Option<SessionToken> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Drop the token, on logout or when the server reports it expired
    pub fn clear(&self) -> Result<(), SessionError> {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
        tracing::debug!("Session token cleared");

        if let Some(path) = &self.path {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(source) => {
                    return Err(SessionError::Io {
                        path: path.clone(),
                        source,
                    })
                }
            }
        }
        Ok(())
    }
}

fn load(path: &Path) -> Result<Option<SessionToken>, SessionError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(SessionError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let session: PersistedSession =
        serde_json::from_str(&content).map_err(|source| SessionError::Corrupt {
            path: path.to_path_buf(),
            source,
        })?;
    if session.token.as_str().trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(session.token))
}

fn save(path: &Path, session: &PersistedSession) -> Result<(), SessionError> {
    let io_err = |source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = serde_json::to_string_pretty(session).map_err(|source| {
        SessionError::Corrupt {
            path: path.to_path_buf(),
            source,
        }
    })?;
    write_private(path, content.as_bytes()).map_err(io_err)
}

/// Write a file only the current user can read
#[cfg(unix)]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // mode() only applies on create; tighten a file left by an older run
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(content)
}

#[cfg(not(unix))]
fn write_private(path: &Path, content: &[u8]) -> std::io::Result<()> {
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn session_path(dir: &TempDir) -> PathBuf {
        dir.path().join("nested").join("session.json")
    }

    #[test]
    fn test_starts_empty() {
        let store = SessionStore::in_memory();
        assert!(store.get().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_set_then_get() {
        let store = SessionStore::in_memory();
        store.set(SessionToken::new("tok123")).unwrap();
        assert_eq!(store.get(), Some(SessionToken::new("tok123")));
    }

    #[test]
    fn test_set_overwrites() {
        let store = SessionStore::in_memory();
        store.set(SessionToken::new("first")).unwrap();
        store.set(SessionToken::new("second")).unwrap();
        assert_eq!(store.get().unwrap().as_str(), "second");
    }

    #[test]
    fn test_clear_removes_token() {
        let store = SessionStore::in_memory();
        store.set(SessionToken::new("tok123")).unwrap();
        store.clear().unwrap();
        assert!(store.get().is_none());
    }

    #[test]
    fn test_clones_share_token() {
        let store = SessionStore::in_memory();
        let reader = store.clone();
        store.set(SessionToken::new("shared")).unwrap();
        assert_eq!(reader.get().unwrap().as_str(), "shared");
    }

    #[test]
    fn test_token_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = session_path(&dir);

        let store = SessionStore::open(&path).unwrap();
        store.set(SessionToken::new("persisted")).unwrap();

        let reopened = SessionStore::open(&path).unwrap();
        assert_eq!(reopened.get().unwrap().as_str(), "persisted");
    }

    #[test]
    fn test_clear_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = session_path(&dir);

        let store = SessionStore::open(&path).unwrap();
        store.set(SessionToken::new("gone")).unwrap();
        store.clear().unwrap();

        assert!(!path.exists());
        assert!(SessionStore::open(&path).unwrap().get().is_none());
    }

    #[test]
    fn test_clear_without_file_is_ok() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::open(session_path(&dir)).unwrap();
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_corrupt_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let result = SessionStore::open(&path);
        assert!(matches!(result, Err(SessionError::Corrupt { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_session_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = session_path(&dir);
        let mode = |path: &Path| fs::metadata(path).unwrap().permissions().mode() & 0o777;

        let store = SessionStore::open(&path).unwrap();
        store.set(SessionToken::new("tok123")).unwrap();
        assert_eq!(mode(&path), 0o600);

        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        store.set(SessionToken::new("tok456")).unwrap();
        assert_eq!(mode(&path), 0o600);
    }

    #[test]
    fn test_blank_stored_token_is_no_session() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        fs::write(
            &path,
            r#"{"token": "  ", "issued_at": "2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();

        assert!(!SessionStore::open(&path).unwrap().is_authenticated());
    }

    #[test]
    fn test_debug_never_prints_token() {
        let token = SessionToken::new("supersecret");
        assert!(!format!("{token:?}").contains("supersecret"));
        assert_eq!(token.redacted(), "supe…");
    }
}
