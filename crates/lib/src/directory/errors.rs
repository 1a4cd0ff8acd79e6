//! Error types for user-directory operations.
//!
//! This module defines structured error types for the relational user
//! store, providing better error context and type safety compared to
//! string-based errors.

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during user-directory operations.
///
/// # Stability
///
/// - New variants may be added in minor versions (enum is `#[non_exhaustive]`)
/// - Existing variants will not be removed in minor versions
/// - Helper methods like `is_*()` provide stable APIs
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// No user record with the given name.
    #[error("User not found: {name}")]
    UserNotFound {
        /// The name that was looked up
        name: String,
    },

    /// No user record with the given id.
    #[error("User not found: {id}")]
    UserIdNotFound {
        /// The id that was looked up
        id: Uuid,
    },

    /// A record with the given name already exists.
    ///
    /// Raised when the backing store rejects a create with a uniqueness
    /// violation; the store's verdict is authoritative.
    #[error("User already exists: {name}")]
    UserAlreadyExists {
        /// The conflicting name
        name: String,
    },

    /// The backing store could not be reached or rejected the operation.
    #[error("User directory unavailable: {reason}")]
    Unavailable {
        /// Description of the failure
        reason: String,
        /// The underlying sqlx error, when one exists
        #[source]
        source: Option<sqlx::Error>,
    },

    /// A stored row could not be decoded into a user record.
    #[error("Corrupt user record: {reason}")]
    CorruptRecord {
        /// Description of the corruption
        reason: String,
    },
}

impl DirectoryError {
    /// Error for a name that is already taken.
    ///
    /// The enum is `#[non_exhaustive]`, so callers outside this crate
    /// (the register probe) construct the conflict through this.
    pub fn already_exists(name: impl Into<String>) -> Self {
        DirectoryError::UserAlreadyExists { name: name.into() }
    }

    /// Check if this error indicates a user was not found.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DirectoryError::UserNotFound { .. } | DirectoryError::UserIdNotFound { .. }
        )
    }

    /// Check if this error indicates a name conflict.
    pub fn is_already_exists(&self) -> bool {
        matches!(self, DirectoryError::UserAlreadyExists { .. })
    }

    /// Check if this error indicates the backing store was unreachable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DirectoryError::Unavailable { .. })
    }

    /// Check if this error indicates an undecodable stored record.
    pub fn is_corrupt_record(&self) -> bool {
        matches!(self, DirectoryError::CorruptRecord { .. })
    }

    /// Get the user name if this error is about a specific name.
    pub fn user_name(&self) -> Option<&str> {
        match self {
            DirectoryError::UserNotFound { name }
            | DirectoryError::UserAlreadyExists { name } => Some(name),
            _ => None,
        }
    }
}

// Conversion from DirectoryError to the main Error type
impl From<DirectoryError> for crate::Error {
    fn from(err: DirectoryError) -> Self {
        crate::Error::Directory(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_helpers() {
        let err = DirectoryError::UserNotFound {
            name: "alice".to_string(),
        };
        assert!(err.is_not_found());
        assert_eq!(err.user_name(), Some("alice"));

        let err = DirectoryError::UserIdNotFound { id: Uuid::new_v4() };
        assert!(err.is_not_found());
        assert_eq!(err.user_name(), None);

        let err = DirectoryError::UserAlreadyExists {
            name: "alice".to_string(),
        };
        assert!(err.is_already_exists());
        assert!(!err.is_not_found());

        let err = DirectoryError::Unavailable {
            reason: "test".to_string(),
            source: None,
        };
        assert!(err.is_unavailable());

        let err = DirectoryError::CorruptRecord {
            reason: "test".to_string(),
        };
        assert!(err.is_corrupt_record());
    }

    #[test]
    fn test_error_conversion() {
        let directory_err = DirectoryError::UserAlreadyExists {
            name: "alice".to_string(),
        };
        let err: crate::Error = directory_err.into();
        assert!(err.is_conflict());
        assert_eq!(err.module(), "directory");
    }
}
