//! Dispatch-layer error taxonomy for the CLI.

use thiserror::Error;

/// Errors produced by the command registry and handlers.
///
/// Failures from the session store and user directory pass through
/// unchanged in the `Core` variant; this enum adds only the
/// dispatch-layer taxonomy.
#[derive(Debug, Error)]
pub enum CliError {
    /// The command name is not bound to any handler.
    #[error("Unknown command: {name}")]
    UnknownCommand {
        /// The name as it was typed
        name: String,
    },

    /// A handler was registered twice for the same command.
    #[error("Command already registered: {name}")]
    DuplicateCommand {
        /// The doubly-bound command name
        name: &'static str,
    },

    /// A required argument is missing or unusable.
    #[error("Invalid argument for {command}: {reason}")]
    InvalidArgument {
        /// The command that rejected its input
        command: &'static str,
        /// What was wrong with it
        reason: String,
    },

    /// A failure from the session store or user directory.
    #[error(transparent)]
    Core(#[from] roster::Error),
}

impl CliError {
    /// Check if this error should be accompanied by the usage message.
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            CliError::UnknownCommand { .. } | CliError::InvalidArgument { .. }
        )
    }

    /// Check if this error is an unknown-command dispatch failure.
    pub fn is_unknown_command(&self) -> bool {
        matches!(self, CliError::UnknownCommand { .. })
    }

    /// Check if this error is a duplicate handler registration.
    pub fn is_duplicate_command(&self) -> bool {
        matches!(self, CliError::DuplicateCommand { .. })
    }

    /// Check if this error is a rejected command argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CliError::InvalidArgument { .. })
    }

    /// Check if this error indicates a missing user or session document.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CliError::Core(e) if e.is_not_found())
    }

    /// Check if this error indicates a user-name conflict.
    pub fn is_conflict(&self) -> bool {
        matches!(self, CliError::Core(e) if e.is_conflict())
    }
}
