//! User directory over a relational store.
//!
//! The directory owns user records and is their sole writer. It is backed
//! by sqlx's `AnyPool` so the same code serves both SQLite and PostgreSQL;
//! the backing store is selected by the connection string's scheme.
//!
//! The directory exposes exactly the operations the command handlers
//! need: lookup by name, lookup by id, create, and list-all. Name
//! uniqueness is enforced by the store's UNIQUE constraint, and a
//! constraint violation at create time is surfaced as
//! [`DirectoryError::UserAlreadyExists`] — the store's verdict is
//! authoritative, even when an earlier existence probe reported the name
//! as free.

mod errors;

/// Schema definition and versioning.
pub mod schema;


pub use errors::DirectoryError;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;
use uuid::Uuid;

use crate::Result;
use crate::clock::{Clock, SystemClock};

/// Extension trait for sqlx Result types to simplify error handling.
///
/// Similar to `anyhow::Context`, this trait adds a method to convert
/// sqlx errors to [`DirectoryError::Unavailable`] with a context message.
pub(crate) trait SqlxResultExt<T> {
    /// Convert sqlx error to DirectoryError with context message.
    fn sql_context(self, context: &str) -> Result<T>;
}

impl<T> SqlxResultExt<T> for std::result::Result<T, sqlx::Error> {
    fn sql_context(self, context: &str) -> Result<T> {
        self.map_err(|e| {
            DirectoryError::Unavailable {
                reason: format!("{context}: {e}"),
                source: Some(e),
            }
            .into()
        })
    }
}

/// Database backend kind for SQL dialect selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbKind {
    /// SQLite database
    Sqlite,
    /// PostgreSQL database
    Postgres,
}

/// A registered user record.
///
/// Created exactly once by `register`; never updated or deleted by this
/// crate. `updated_at` equals `created_at` until some future operation
/// mutates the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique identifier, generated once at creation
    pub id: Uuid,
    /// Unique name (login identifier)
    pub name: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// The user directory, backed by a relational store through sqlx.
#[derive(Debug)]
pub struct UserDirectory {
    pool: AnyPool,
    kind: DbKind,
    clock: Arc<dyn Clock>,
}

impl UserDirectory {
    /// Connect to the backing store named by `url`.
    ///
    /// The URL scheme selects the backend: `sqlite:` or `postgres:`.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_clock(url, Arc::new(SystemClock)).await
    }

    /// Connect with an explicit time source for record timestamps.
    pub async fn connect_with_clock(url: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        if url.starts_with("sqlite") {
            #[cfg(feature = "sqlite")]
            {
                return Self::connect_sqlite_with_clock(url, clock).await;
            }
            #[cfg(not(feature = "sqlite"))]
            {
                return Err(DirectoryError::Unavailable {
                    reason: "SQLite support is not compiled in".to_string(),
                    source: None,
                }
                .into());
            }
        }

        if url.starts_with("postgres") {
            #[cfg(feature = "postgres")]
            {
                return Self::connect_postgres_with_clock(url, clock).await;
            }
            #[cfg(not(feature = "postgres"))]
            {
                return Err(DirectoryError::Unavailable {
                    reason: "PostgreSQL support is not compiled in".to_string(),
                    source: None,
                }
                .into());
            }
        }

        Err(DirectoryError::Unavailable {
            reason: format!("unsupported connection string scheme: {url}"),
            source: None,
        }
        .into())
    }

    /// Get a reference to the underlying pool.
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Get the database kind.
    pub fn kind(&self) -> DbKind {
        self.kind
    }

    /// Check if this directory is using SQLite.
    pub fn is_sqlite(&self) -> bool {
        self.kind == DbKind::Sqlite
    }

    /// Check if this directory is using PostgreSQL.
    pub fn is_postgres(&self) -> bool {
        self.kind == DbKind::Postgres
    }
}

// SQLite-specific constructors
#[cfg(feature = "sqlite")]
impl UserDirectory {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the database file and schema if they don't exist.
    pub async fn open_sqlite<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        // mode=rwc: read-write-create (create file if it doesn't exist)
        let url = format!("sqlite:{}?mode=rwc", path.as_ref().display());
        Self::connect_sqlite(&url).await
    }

    /// Connect to a SQLite database using a connection URL.
    pub async fn connect_sqlite(url: &str) -> Result<Self> {
        Self::connect_sqlite_with_clock(url, Arc::new(SystemClock)).await
    }

    /// Connect to SQLite with an explicit time source.
    pub async fn connect_sqlite_with_clock(url: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        // Install any driver support
        sqlx::any::install_default_drivers();

        let is_in_memory = url.contains("mode=memory");

        // For SQLite in-memory databases with shared cache, keep at least
        // one connection alive for the pool's lifetime. When the last
        // connection closes, the in-memory database is destroyed.
        let pool = if is_in_memory {
            AnyPoolOptions::new()
                .max_connections(5)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(url)
                .await
                .sql_context("Failed to connect to SQLite")?
        } else {
            AnyPoolOptions::new()
                .max_connections(5)
                .connect(url)
                .await
                .sql_context("Failed to connect to SQLite")?
        };

        // Configure SQLite pragmas
        if is_in_memory {
            // In-memory databases don't need WAL mode (all in RAM)
            sqlx::query("PRAGMA busy_timeout = 5000;")
                .execute(&pool)
                .await
                .sql_context("Failed to configure SQLite")?;
        } else {
            // File-based SQLite:
            // - journal_mode=WAL: Write-Ahead Logging for better concurrency
            // - synchronous=NORMAL: Balanced durability (safe with WAL)
            // - busy_timeout=5000: Wait up to 5s for locks before failing
            sqlx::query(
                "PRAGMA journal_mode = WAL;
                 PRAGMA synchronous = NORMAL;
                 PRAGMA busy_timeout = 5000;",
            )
            .execute(&pool)
            .await
            .sql_context("Failed to configure SQLite")?;
        }

        let directory = Self {
            pool,
            kind: DbKind::Sqlite,
            clock,
        };

        schema::initialize(&directory).await?;

        Ok(directory)
    }

    /// Create an in-memory SQLite directory.
    ///
    /// The database exists only for the lifetime of this directory
    /// instance. Useful for testing.
    pub async fn sqlite_in_memory() -> Result<Self> {
        Self::sqlite_in_memory_with_clock(Arc::new(SystemClock)).await
    }

    /// Create an in-memory SQLite directory with an explicit time source.
    pub async fn sqlite_in_memory_with_clock(clock: Arc<dyn Clock>) -> Result<Self> {
        // Use shared cache mode so all connections in the pool see the
        // same database, and a unique name per instance so separate
        // directories (and tests) don't share state.
        let unique_id = Uuid::new_v4();
        let url = format!("sqlite:file:roster_mem_{unique_id}?mode=memory&cache=shared");
        Self::connect_sqlite_with_clock(&url, clock).await
    }
}

// PostgreSQL-specific constructors
#[cfg(feature = "postgres")]
impl UserDirectory {
    /// Connect to a PostgreSQL database using a connection URL.
    pub async fn connect_postgres(url: &str) -> Result<Self> {
        Self::connect_postgres_with_clock(url, Arc::new(SystemClock)).await
    }

    /// Connect to PostgreSQL with an explicit time source.
    pub async fn connect_postgres_with_clock(url: &str, clock: Arc<dyn Clock>) -> Result<Self> {
        // Install any driver support
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .sql_context("Failed to connect to PostgreSQL")?;

        let directory = Self {
            pool,
            kind: DbKind::Postgres,
            clock,
        };

        schema::initialize(&directory).await?;

        Ok(directory)
    }
}

// Directory operations
impl UserDirectory {
    /// Look up a user by name.
    ///
    /// Fails with [`DirectoryError::UserNotFound`] when no record with
    /// the given name exists.
    pub async fn find_by_name(&self, name: &str) -> Result<User> {
        let row: Option<(String, String, i64, i64)> = sqlx::query_as(
            "SELECT id, name, created_at, updated_at FROM users WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .sql_context("Failed to query user by name")?;

        match row {
            Some(row) => decode_user(row),
            None => Err(DirectoryError::UserNotFound {
                name: name.to_string(),
            }
            .into()),
        }
    }

    /// Look up a user by id.
    ///
    /// Fails with [`DirectoryError::UserIdNotFound`] when no record with
    /// the given id exists.
    pub async fn find_by_id(&self, id: &Uuid) -> Result<User> {
        let row: Option<(String, String, i64, i64)> = sqlx::query_as(
            "SELECT id, name, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .sql_context("Failed to query user by id")?;

        match row {
            Some(row) => decode_user(row),
            None => Err(DirectoryError::UserIdNotFound { id: *id }.into()),
        }
    }

    /// Create a new user record with a fresh id and current timestamps.
    ///
    /// Fails with [`DirectoryError::UserAlreadyExists`] when the store
    /// rejects the name as a duplicate.
    pub async fn create(&self, name: &str) -> Result<User> {
        // Timestamps round-trip through BIGINT milliseconds; truncate up
        // front so the returned record matches what later reads decode.
        let now_millis = self.clock.now_millis();
        let now =
            DateTime::from_timestamp_millis(now_millis).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
        };

        let result = sqlx::query(
            "INSERT INTO users (id, name, created_at, updated_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(now_millis)
        .bind(now_millis)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => {
                tracing::info!(name = %user.name, id = %user.id, "created user");
                Ok(user)
            }
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                Err(DirectoryError::UserAlreadyExists {
                    name: name.to_string(),
                }
                .into())
            }
            Err(e) => Err(e).sql_context("Failed to create user"),
        }
    }

    /// All user records, in whatever order the store returns them.
    ///
    /// Callers must not depend on the order.
    pub async fn list_all(&self) -> Result<Vec<User>> {
        let rows: Vec<(String, String, i64, i64)> =
            sqlx::query_as("SELECT id, name, created_at, updated_at FROM users")
                .fetch_all(&self.pool)
                .await
                .sql_context("Failed to list users")?;

        rows.into_iter().map(decode_user).collect()
    }
}

fn decode_user((id, name, created_at, updated_at): (String, String, i64, i64)) -> Result<User> {
    let id = Uuid::parse_str(&id).map_err(|e| DirectoryError::CorruptRecord {
        reason: format!("invalid id for user {name}: {e}"),
    })?;
    let created_at =
        DateTime::from_timestamp_millis(created_at).ok_or_else(|| DirectoryError::CorruptRecord {
            reason: format!("invalid created_at for user {name}"),
        })?;
    let updated_at =
        DateTime::from_timestamp_millis(updated_at).ok_or_else(|| DirectoryError::CorruptRecord {
            reason: format!("invalid updated_at for user {name}"),
        })?;

    Ok(User {
        id,
        name,
        created_at,
        updated_at,
    })
}
