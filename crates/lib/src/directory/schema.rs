//! SQL schema definition and versioning for the user directory.
//!
//! The schema uses portable SQL that works on both SQLite and PostgreSQL.
//! Schema changes are handled via code rather than SQL migration files so
//! dialect differences can be dealt with where they arise: when
//! `SCHEMA_VERSION` grows past 1, add a `migrate_vN_to_vM` function and
//! dispatch on the stored version in [`initialize`].

use crate::Result;

use super::{DirectoryError, SqlxResultExt, UserDirectory};

/// Current schema version.
///
/// Increment this when making schema changes that require migration.
pub const SCHEMA_VERSION: i64 = 1;

/// SQL statements to create the schema tables.
pub const CREATE_TABLES: &[&str] = &[
    // Schema version tracking
    // BIGINT (64-bit) used for portability between SQLite and PostgreSQL
    "CREATE TABLE IF NOT EXISTS schema_version (
        version BIGINT PRIMARY KEY
    )",
    // User records
    // Name uniqueness is enforced here; the directory treats a violation
    // of this constraint as the authoritative already-exists outcome.
    // Timestamps are epoch milliseconds (BIGINT) for portability.
    "CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL UNIQUE,
        created_at BIGINT NOT NULL,
        updated_at BIGINT NOT NULL
    )",
];

/// Initialize the database schema.
///
/// Creates missing tables and stamps a fresh database with the current
/// version. A database stamped with an unknown version is refused rather
/// than guessed at.
pub(crate) async fn initialize(directory: &UserDirectory) -> Result<()> {
    for statement in CREATE_TABLES {
        sqlx::query(statement)
            .execute(directory.pool())
            .await
            .sql_context("Failed to create schema")?;
    }

    match stored_version(directory).await? {
        None => {
            sqlx::query("INSERT INTO schema_version (version) VALUES ($1)")
                .bind(SCHEMA_VERSION)
                .execute(directory.pool())
                .await
                .sql_context("Failed to stamp schema version")?;
            tracing::debug!(version = SCHEMA_VERSION, "initialized directory schema");
            Ok(())
        }
        Some(version) if version == SCHEMA_VERSION => Ok(()),
        Some(version) => Err(DirectoryError::Unavailable {
            reason: format!(
                "no migration path from schema version {version} to {SCHEMA_VERSION}"
            ),
            source: None,
        }
        .into()),
    }
}

async fn stored_version(directory: &UserDirectory) -> Result<Option<i64>> {
    let row: Option<(i64,)> = sqlx::query_as("SELECT version FROM schema_version")
        .fetch_optional(directory.pool())
        .await
        .sql_context("Failed to read schema version")?;
    Ok(row.map(|(version,)| version))
}
