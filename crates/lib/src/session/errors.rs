//! Error types for session-document persistence.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or writing the session document.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SessionError {
    /// The session document does not exist.
    #[error("Session document not found: {path}")]
    NotFound {
        /// The path that was probed
        path: PathBuf,
    },

    /// The document exists but could not be parsed.
    #[error("Session document is corrupt: {path}")]
    Corrupt {
        /// The path of the unparsable document
        path: PathBuf,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Encoding the document for writing failed.
    #[error("Failed to encode session document")]
    Serialize {
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },

    /// Reading or durably writing the document failed.
    #[error("Session document I/O failed: {path}")]
    FileIo {
        /// The path being read or written
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The home directory could not be determined for the default path.
    #[error("Cannot determine home directory for the session document")]
    HomeDirNotFound,
}

impl SessionError {
    /// Check if this error indicates the document was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SessionError::NotFound { .. })
    }

    /// Check if this error indicates an unparsable document.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, SessionError::Corrupt { .. })
    }

    /// Check if this error is related to I/O operations.
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            SessionError::FileIo { .. } | SessionError::Serialize { .. }
        )
    }

    /// Get the document path if this error is about a specific file.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            SessionError::NotFound { path }
            | SessionError::Corrupt { path, .. }
            | SessionError::FileIo { path, .. } => Some(path),
            _ => None,
        }
    }
}

// Conversion from SessionError to the main Error type
impl From<SessionError> for crate::Error {
    fn from(err: SessionError) -> Self {
        crate::Error::Session(err)
    }
}
