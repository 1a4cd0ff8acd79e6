//! User-directory operation tests against in-memory SQLite.

use std::collections::HashSet;

use crate::helpers::test_directory;

#[tokio::test]
async fn create_then_find_by_name() {
    let directory = test_directory().await;

    let created = directory.create("alice").await.unwrap();
    assert_eq!(created.name, "alice");
    assert_eq!(created.created_at, created.updated_at);

    let found = directory.find_by_name("alice").await.unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn find_by_name_absent_user() {
    let directory = test_directory().await;
    let err = directory.find_by_name("nobody").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn create_then_find_by_id() {
    let directory = test_directory().await;

    let created = directory.create("alice").await.unwrap();
    let found = directory.find_by_id(&created.id).await.unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn find_by_id_absent_user() {
    let directory = test_directory().await;
    let err = directory
        .find_by_id(&uuid::Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn duplicate_create_is_a_conflict() {
    let directory = test_directory().await;

    directory.create("alice").await.unwrap();
    let err = directory.create("alice").await.unwrap_err();
    assert!(err.is_conflict());

    // The store still holds exactly one record for the name
    let all = directory.list_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "alice");
}

#[tokio::test]
async fn list_all_returns_every_record() {
    let directory = test_directory().await;

    directory.create("alice").await.unwrap();
    directory.create("bob").await.unwrap();

    let all = directory.list_all().await.unwrap();
    assert_eq!(all.len(), 2);

    let names: HashSet<_> = all.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, HashSet::from(["alice", "bob"]));

    // Each record carries a distinct id and real timestamps
    let ids: HashSet<_> = all.iter().map(|u| u.id).collect();
    assert_eq!(ids.len(), 2);
    for user in &all {
        assert!(user.created_at.timestamp_millis() > 0);
        assert!(user.updated_at.timestamp_millis() > 0);
    }
}

#[tokio::test]
async fn list_all_on_fresh_directory_is_empty() {
    let directory = test_directory().await;
    assert!(directory.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn operations_fail_unavailable_after_close() {
    let directory = test_directory().await;
    directory.create("alice").await.unwrap();

    directory.pool().close().await;

    let err = directory.find_by_name("alice").await.unwrap_err();
    assert!(err.is_unavailable());
}
