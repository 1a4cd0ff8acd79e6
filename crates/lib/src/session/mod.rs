//! Session-document persistence.
//!
//! The session document is a small JSON file recording how to reach the
//! user directory's backing store and which user is currently active. It
//! is loaded once at process start and rewritten as a whole on every
//! successful `register` or `login`; nothing here ever deletes it.
//!
//! Writes always replace the complete document: the new contents go to a
//! named temporary file in the same directory, which is then renamed over
//! the original. An interrupted write leaves the previous document intact.

mod errors;

pub use errors::SessionError;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::Result;

/// File name of the session document under the home directory.
pub const SESSION_FILE_NAME: &str = ".rosterconfig.json";

/// The persisted session state.
///
/// Exactly two fields are recognized. `connection_string` is opaque to
/// this crate and never mutated; an empty `current_user_name` means no
/// active session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDocument {
    /// URL of the user directory's backing store
    pub connection_string: String,

    /// Name of the last user who logged in or registered; empty when
    /// no session is active
    #[serde(default)]
    pub current_user_name: String,
}

/// Store managing the session document on disk.
///
/// The document is held behind an interior lock so handlers can share
/// `&SessionStore`; only one command runs per process, so the lock is a
/// sharing convenience rather than a concurrency claim.
#[derive(Debug)]
pub struct SessionStore {
    path: PathBuf,
    document: RwLock<SessionDocument>,
}

impl SessionStore {
    /// Default location of the session document: `~/.rosterconfig.json`.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(SessionError::HomeDirNotFound)?;
        Ok(home.join(SESSION_FILE_NAME))
    }

    /// Load the session document from `path`.
    ///
    /// Fails with [`SessionError::NotFound`] when the file does not exist
    /// and [`SessionError::Corrupt`] when it exists but cannot be parsed.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SessionError::NotFound { path }.into());
            }
            Err(e) => return Err(SessionError::FileIo { path, source: e }.into()),
        };

        let document: SessionDocument = serde_json::from_str(&raw).map_err(|e| SessionError::Corrupt {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), "loaded session document");
        Ok(Self {
            path,
            document: RwLock::new(document),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The connection string for the user directory's backing store.
    pub fn connection_string(&self) -> String {
        self.document.read().unwrap().connection_string.clone()
    }

    /// Name of the currently active user, if any.
    pub fn current_user(&self) -> Option<String> {
        let document = self.document.read().unwrap();
        if document.current_user_name.is_empty() {
            None
        } else {
            Some(document.current_user_name.clone())
        }
    }

    /// A snapshot of the in-memory document.
    pub fn document(&self) -> SessionDocument {
        self.document.read().unwrap().clone()
    }

    /// Record `name` as the active user and durably rewrite the document.
    ///
    /// The in-memory document is only updated after the replacement file
    /// has been renamed into place, so a failed write leaves both the
    /// on-disk and in-memory state unchanged.
    pub fn set_active_user(&self, name: &str) -> Result<()> {
        let mut updated = self.document();
        updated.current_user_name = name.to_string();

        self.write_document(&updated)?;
        *self.document.write().unwrap() = updated;

        tracing::info!(user = name, "session user updated");
        Ok(())
    }

    /// Rewrite the current document unchanged.
    pub fn store(&self) -> Result<()> {
        let document = self.document();
        self.write_document(&document)
    }

    // Whole-document replacement: temp file in the target directory, then
    // an atomic rename over the original.
    fn write_document(&self, document: &SessionDocument) -> Result<()> {
        let json = serde_json::to_string_pretty(document)
            .map_err(|e| SessionError::Serialize { source: e })?;

        let dir = self.path.parent().unwrap_or_else(|| Path::new("."));
        let file_io = |source: std::io::Error| SessionError::FileIo {
            path: self.path.clone(),
            source,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(file_io)?;
        tmp.write_all(json.as_bytes()).map_err(file_io)?;
        tmp.as_file().sync_all().map_err(file_io)?;
        tmp.persist(&self.path)
            .map_err(|e| file_io(e.error))?;

        Ok(())
    }
}
