//! Shared helpers for the integration suite.

use std::path::PathBuf;

use roster::{SessionStore, UserDirectory};
use tempfile::TempDir;

/// Create a fresh in-memory directory.
pub async fn test_directory() -> UserDirectory {
    UserDirectory::sqlite_in_memory()
        .await
        .expect("Failed to create in-memory directory")
}

/// Write a session document into `dir` and return its path.
pub fn seed_session_file(dir: &TempDir, connection_string: &str, current_user: &str) -> PathBuf {
    let path = dir.path().join(".rosterconfig.json");
    let json = serde_json::json!({
        "connection_string": connection_string,
        "current_user_name": current_user,
    });
    std::fs::write(&path, serde_json::to_string_pretty(&json).unwrap())
        .expect("Failed to seed session file");
    path
}

/// Seed a session document and load a store over it.
pub fn seed_session(dir: &TempDir, connection_string: &str, current_user: &str) -> SessionStore {
    let path = seed_session_file(dir, connection_string, current_user);
    SessionStore::load(path).expect("Failed to load seeded session")
}
