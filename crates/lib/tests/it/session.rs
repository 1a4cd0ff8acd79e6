//! Session-document lifecycle tests.

use roster::SessionStore;
use tempfile::TempDir;

use crate::helpers::{seed_session, seed_session_file};

#[test]
fn load_missing_document_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = SessionStore::load(dir.path().join("absent.json")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn load_unparsable_document_is_corrupt() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".rosterconfig.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = SessionStore::load(&path).unwrap_err();
    assert!(err.is_corrupt());
    assert!(!err.is_not_found());
}

#[test]
fn missing_user_field_means_no_session() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(".rosterconfig.json");
    std::fs::write(&path, r#"{"connection_string":"sqlite:roster.db"}"#).unwrap();

    let session = SessionStore::load(&path).unwrap();
    assert_eq!(session.connection_string(), "sqlite:roster.db");
    assert_eq!(session.current_user(), None);
}

#[test]
fn empty_user_field_means_no_session() {
    let dir = TempDir::new().unwrap();
    let session = seed_session(&dir, "sqlite:roster.db", "");
    assert_eq!(session.current_user(), None);
}

#[test]
fn store_round_trips_unchanged() {
    let dir = TempDir::new().unwrap();
    let session = seed_session(&dir, "postgres://localhost/roster", "alice");

    session.store().unwrap();

    let reloaded = SessionStore::load(session.path()).unwrap();
    assert_eq!(reloaded.connection_string(), "postgres://localhost/roster");
    assert_eq!(reloaded.current_user(), Some("alice".to_string()));
}

#[test]
fn set_active_user_persists() {
    let dir = TempDir::new().unwrap();
    let session = seed_session(&dir, "sqlite:roster.db", "");

    session.set_active_user("alice").unwrap();
    assert_eq!(session.current_user(), Some("alice".to_string()));

    let reloaded = SessionStore::load(session.path()).unwrap();
    assert_eq!(reloaded.current_user(), Some("alice".to_string()));
    // The connection string is never touched by a session write
    assert_eq!(reloaded.connection_string(), "sqlite:roster.db");
}

#[test]
fn set_active_user_replaces_previous_session() {
    let dir = TempDir::new().unwrap();
    let session = seed_session(&dir, "sqlite:roster.db", "alice");

    session.set_active_user("bob").unwrap();

    let reloaded = SessionStore::load(session.path()).unwrap();
    assert_eq!(reloaded.current_user(), Some("bob".to_string()));
}

#[test]
fn rewrite_leaves_no_temp_debris() {
    let dir = TempDir::new().unwrap();
    let session = seed_session(&dir, "sqlite:roster.db", "");

    session.set_active_user("alice").unwrap();
    session.set_active_user("bob").unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "only the session document should remain");
}

#[test]
fn tolerates_extra_fields_but_not_wrong_types() {
    // Extra fields are ignored on load (only the two recognized fields
    // are interpreted), but wrong types for recognized fields are corrupt.
    let dir = TempDir::new().unwrap();
    let path = seed_session_file(&dir, "sqlite:roster.db", "alice");

    let mut value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    value["comment"] = serde_json::json!("scribble");
    std::fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();
    assert!(SessionStore::load(&path).is_ok());

    std::fs::write(&path, r#"{"connection_string": 7}"#).unwrap();
    let err = SessionStore::load(&path).unwrap_err();
    assert!(err.is_corrupt());
}
