//!
//! Roster: a single-session user roster backed by a relational store.
//!
//! This library provides the components behind the `roster` CLI:
//!
//! * **Session Store (`session`)**: the locally persisted session document
//!   recording how to reach the backing store and which user is currently
//!   active. Loaded once per process, rewritten as a whole on every
//!   successful `register` or `login`.
//! * **User Directory (`directory`)**: the logical store of registered
//!   users, backed by SQLite or PostgreSQL through sqlx. Owns user records
//!   and enforces name uniqueness.
//! * **Clock (`clock`)**: a time provider injected into the directory so
//!   record timestamps are controllable in tests.
//!
//! The command registry and handlers live in the `roster` binary; this
//! crate holds the state they compose.

pub mod clock;
pub mod directory;
pub mod session;

pub use clock::{Clock, SystemClock};
pub use directory::{User, UserDirectory};
pub use session::{SessionDocument, SessionStore};

#[cfg(any(test, feature = "testing"))]
pub use clock::FixedClock;

/// Result type used throughout the Roster library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Roster library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured session-document errors from the session module
    #[error(transparent)]
    Session(session::SessionError),

    /// Structured user-directory errors from the directory module
    #[error(transparent)]
    Directory(directory::DirectoryError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Session(_) => "session",
            Error::Directory(_) => "directory",
            Error::Io(_) => "io",
            Error::Serialize(_) => "serialize",
        }
    }

    /// Check if this error indicates a resource was not found.
    ///
    /// Covers both a missing session document and a missing user record.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Session(session_err) => session_err.is_not_found(),
            Error::Directory(directory_err) => directory_err.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error indicates a conflict (user already exists).
    pub fn is_conflict(&self) -> bool {
        match self {
            Error::Directory(directory_err) => directory_err.is_already_exists(),
            _ => false,
        }
    }

    /// Check if this error indicates the backing store was unreachable.
    pub fn is_unavailable(&self) -> bool {
        match self {
            Error::Directory(directory_err) => directory_err.is_unavailable(),
            _ => false,
        }
    }

    /// Check if this error indicates corrupt persisted data.
    pub fn is_corrupt(&self) -> bool {
        match self {
            Error::Session(session_err) => session_err.is_corrupt(),
            Error::Directory(directory_err) => directory_err.is_corrupt_record(),
            _ => false,
        }
    }

    /// Check if this error is I/O related.
    pub fn is_io_error(&self) -> bool {
        match self {
            Error::Io(_) => true,
            Error::Session(session_err) => session_err.is_io_error(),
            _ => false,
        }
    }
}
