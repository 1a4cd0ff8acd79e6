//! Shared execution context for command handlers.

use roster::{SessionStore, UserDirectory};

/// Everything a handler needs: the session store and the user directory.
///
/// Built once at startup and borrowed by the single dispatched command.
pub struct AppContext {
    /// The loaded session document
    pub session: SessionStore,
    /// The connected user directory
    pub directory: UserDirectory,
}

impl AppContext {
    pub fn new(session: SessionStore, directory: UserDirectory) -> Self {
        Self { session, directory }
    }
}
